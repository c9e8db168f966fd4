pub mod balance_cmd;
pub mod config_cmd;
pub mod cost_cmd;
pub mod logs_cmd;
pub mod models_cmd;
pub mod node;
pub mod output;
pub mod providers_cmd;
pub mod renderer;

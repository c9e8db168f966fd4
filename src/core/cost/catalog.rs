use serde::Serialize;

use crate::core::models::model::Model;

const OTHER_PROVIDER: &str = "other";

/// Models sharing one upstream provider.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderGroup {
    pub provider: String,
    pub models: Vec<Model>,
}

/// Provider a model is listed under: its explicit provider, else the
/// `provider/` prefix of its id, else "other".
pub fn provider_key(model: &Model) -> String {
    if let Some(provider) = model.provider.as_deref() {
        let provider = provider.trim();
        if !provider.is_empty() {
            return provider.to_lowercase();
        }
    }
    match model.id.split_once('/') {
        Some((prefix, _)) if !prefix.is_empty() => prefix.to_lowercase(),
        _ => OTHER_PROVIDER.to_string(),
    }
}

/// Group models by provider. Groups are sorted by name with "other" last;
/// inside a group enabled models come first, then by display name.
pub fn group_by_provider(models: &[Model]) -> Vec<ProviderGroup> {
    let mut groups: Vec<ProviderGroup> = Vec::new();

    for model in models {
        let key = provider_key(model);
        match groups.iter_mut().find(|g| g.provider == key) {
            Some(group) => group.models.push(model.clone()),
            None => groups.push(ProviderGroup {
                provider: key,
                models: vec![model.clone()],
            }),
        }
    }

    groups.sort_by(|a, b| {
        (a.provider == OTHER_PROVIDER)
            .cmp(&(b.provider == OTHER_PROVIDER))
            .then_with(|| a.provider.cmp(&b.provider))
    });

    for group in &mut groups {
        group.models.sort_by(|a, b| {
            b.enabled
                .cmp(&a.enabled)
                .then_with(|| {
                    a.display_name()
                        .to_lowercase()
                        .cmp(&b.display_name().to_lowercase())
                })
                .then_with(|| a.id.cmp(&b.id))
        });
    }

    groups
}

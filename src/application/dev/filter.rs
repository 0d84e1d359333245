//! Activity filter for dev mode
//!
//! Decides which remote activity the session cares about: one instance, or
//! every instance in the application.

use serde::Serialize;

use crate::domain::entities::InstanceDescriptor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterScope {
    #[default]
    Instance,
    App,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFilter {
    pub stage_name: String,
    pub app_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
}

impl ActivityFilter {
    pub fn new(instance: &InstanceDescriptor, scope: FilterScope) -> Self {
        Self {
            stage_name: instance.stage.clone(),
            app_name: instance.app.clone(),
            instance_name: match scope {
                FilterScope::Instance => Some(instance.name.clone()),
                FilterScope::App => None,
            },
        }
    }

    pub fn is_app_level(&self) -> bool {
        self.instance_name.is_none()
    }

    /// Short human description, e.g. `shop/dev/api` or `shop/dev/*`
    pub fn describe(&self) -> String {
        format!(
            "{}/{}/{}",
            self.app_name,
            self.stage_name,
            self.instance_name.as_deref().unwrap_or("*")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::instance;

    #[test]
    fn instance_scope_names_the_instance() {
        let filter = ActivityFilter::new(&instance("api"), FilterScope::Instance);
        assert_eq!(filter.describe(), "shop/dev/api");
        assert!(!filter.is_app_level());
    }

    #[test]
    fn app_scope_drops_the_instance() {
        let filter = ActivityFilter::new(&instance("api"), FilterScope::App);
        assert!(filter.is_app_level());
        assert_eq!(filter.describe(), "shop/dev/*");
        let json = serde_json::to_value(&filter).unwrap();
        assert!(json.get("instanceName").is_none());
        assert_eq!(json["appName"], "shop");
    }
}

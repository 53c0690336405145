//! Navigation state for front-ends.

use serde::{Deserialize, Serialize};

/// The screen a front-end is showing, with the identifiers it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum View {
    #[default]
    Dashboard,
    Clients,
    #[serde(rename_all = "camelCase")]
    ClientDetail { client_id: String },
    #[serde(rename_all = "camelCase")]
    Processor {
        client_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order_id: Option<String>,
    },
    Settings,
}

impl View {
    /// Client the view is scoped to, if any.
    pub fn client_id(&self) -> Option<&str> {
        match self {
            View::ClientDetail { client_id } | View::Processor { client_id, .. } => {
                Some(client_id.as_str())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_serde() {
        let view = View::Processor {
            client_id: "c1".to_string(),
            order_id: Some("o1".to_string()),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"view": "processor", "clientId": "c1", "orderId": "o1"})
        );

        let back: View = serde_json::from_value(json).unwrap();
        assert_eq!(back, view);
        assert_eq!(back.client_id(), Some("c1"));
    }

    #[test]
    fn test_unit_views() {
        let view: View = serde_json::from_str(r#"{"view":"settings"}"#).unwrap();
        assert_eq!(view, View::Settings);
        assert_eq!(view.client_id(), None);
    }
}

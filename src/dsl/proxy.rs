//! The `proxy "<name>" { ... }` metadata block.

use serde::Serialize;

use crate::dsl::decode;
use crate::dsl::error::{DecodeError, ErrorKind};
use crate::hcl::Item;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proxy {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
}

/// Decode one item already filtered by `proxy`.
pub fn decode_proxy(item: &Item) -> Result<Proxy, DecodeError> {
    let list = decode::object(item, "proxy")?;
    let Some(name) = item.label(0) else {
        return Err(DecodeError::at(item.pos(), ErrorKind::MissingLabel("proxy")));
    };

    Ok(Proxy {
        name: name.to_string(),
        display_name: decode::string(list, "display_name")?,
        description: decode::string(list, "description")?,
        revision: decode::integer(list, "revision")?,
        base_path: decode::string(list, "base_path")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcl::parse;

    #[test]
    fn test_proxy() {
        let doc = parse(
            r#"
            proxy "weather" {
              display_name = "Weather API"
              description  = "Forecasts"
              revision     = 3
              base_path    = "/v1/weather"
            }
            "#,
        )
        .unwrap();

        let proxy = decode_proxy(&doc.filter("proxy").items[0]).unwrap();
        assert_eq!(proxy.name, "weather");
        assert_eq!(proxy.display_name.as_deref(), Some("Weather API"));
        assert_eq!(proxy.revision, Some(3));
    }

    #[test]
    fn test_proxy_requires_name() {
        let doc = parse("proxy { revision = \"two\" }").unwrap();
        let err = decode_proxy(&doc.filter("proxy").items[0]).unwrap_err();
        assert_eq!(err.errors()[0].kind, ErrorKind::MissingLabel("proxy"));
    }
}

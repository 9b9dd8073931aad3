//! HTTP connection blocks of proxy and target endpoints.

use serde::Serialize;

use crate::dsl::common::{decode_properties, Property};
use crate::dsl::decode;
use crate::dsl::error::DecodeError;
use crate::hcl::ObjectList;

/// `http_proxy_connection { base_path virtual_host properties }`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HttpProxyConnection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub virtual_hosts: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

/// `http_target_connection { url properties }`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HttpTargetConnection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

pub fn decode_http_proxy_connection(
    list: &ObjectList,
) -> Result<Option<HttpProxyConnection>, DecodeError> {
    let Some(body) = decode::block(list, "http_proxy_connection", "http_proxy_connection")? else {
        return Ok(None);
    };
    Ok(Some(HttpProxyConnection {
        base_path: decode::string(body, "base_path")?,
        virtual_hosts: decode::strings(body, "virtual_host")?,
        properties: decode_properties(body)?,
    }))
}

pub fn decode_http_target_connection(
    list: &ObjectList,
) -> Result<Option<HttpTargetConnection>, DecodeError> {
    let Some(body) = decode::block(list, "http_target_connection", "http_target_connection")?
    else {
        return Ok(None);
    };
    Ok(Some(HttpTargetConnection {
        url: decode::string(body, "url")?,
        properties: decode_properties(body)?,
    }))
}

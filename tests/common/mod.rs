//! Shared utilities for integration tests.

use std::io::Write;

use apigee_hcl::dsl::{decode_config, Config, DecodeError};
use apigee_hcl::hcl::parse;
use tempfile::NamedTempFile;

/// Parse and decode `source`; a syntax error fails the test.
#[allow(dead_code)]
pub fn decode(source: &str) -> Result<Config, DecodeError> {
    let root = parse(source).unwrap_or_else(|e| panic!("document failed to parse: {}", e));
    decode_config(&root)
}

/// Error messages of `err`, without positions, in order.
#[allow(dead_code)]
pub fn messages(err: &DecodeError) -> Vec<String> {
    err.errors().iter().map(|e| e.kind.to_string()).collect()
}

/// Write `content` to a temporary `.hcl` file that lives as long as the handle.
#[allow(dead_code)]
pub fn write_document(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".hcl")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// A document touching every top-level block kind.
#[allow(dead_code)]
pub const WEATHER_API: &str = r#"
proxy "weather" {
  display_name = "Weather API"
  revision     = 1
  base_path    = "/v1/weather"
}

proxy_endpoint "default" {
  pre_flow {
    request {
      step "verify-api-key" {}
      step "spike-arrest" {}
    }
  }

  flow "forecast" {
    condition = "proxy.pathsuffix MatchesPath \"/forecast\""
    request { step "extract-city" {} }
  }

  http_proxy_connection {
    base_path    = "/v1/weather"
    virtual_host = ["default", "secure"]
  }

  route_rule "default" {
    target_endpoint = "default"
  }
}

target_endpoint "default" {
  http_target_connection {
    url = "https://weather.example.com"
  }
}

policy "verify_api_key" "verify-api-key" {
  apikey { ref = "request.queryparam.apikey" }
}

policy "spike_arrest" "spike-arrest" {
  rate { value = "30ps" }
}

policy "extract_variables" "extract-city" {
  source { value = "request" }
  query_param "city" {
    pattern { value = "{city}" }
  }
}

policy "javascript" "format-response" {
  resource_url = "jsc://format.js"
  content      = "context.setVariable('formatted', true);"
}

policy "quota" "quota" {
  allow { count = 1000 }
  interval { value = "1" }
  time_unit { value = "day" }
}
"#;

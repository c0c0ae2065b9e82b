use serde::Deserialize;

fn default_limit() -> u32 {
    100
}

/// `?skip=&limit=` pagination for the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body returned for every failed request: `{ "error": <message> }`.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawNode {
    pub id: String,
    pub lon: String,
    pub lat: String,
    pub name: String,
    /// `;`-separated
    pub tags: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawEdge {
    pub id: String,
    pub a: String,
    pub b: String,
    pub name: String,
    pub distance_m: String,
    pub danger_score: String,
    pub base_weight: String,
    pub bidirectional: String,
    pub is_accessible: String,
}

use serde::{Deserialize, Serialize};

/// Fixed audience age brackets used by every creator profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBracket {
    Teens,
    YoungAdults,
    Adults,
    Mature,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 4] = [
        AgeBracket::Teens,
        AgeBracket::YoungAdults,
        AgeBracket::Adults,
        AgeBracket::Mature,
    ];
}

impl std::fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgeBracket::Teens => write!(f, "13-17"),
            AgeBracket::YoungAdults => write!(f, "18-24"),
            AgeBracket::Adults => write!(f, "25-34"),
            AgeBracket::Mature => write!(f, "35+"),
        }
    }
}

/// Share of a creator's audience in each [`AgeBracket`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgeDistribution {
    #[serde(rename = "13-17")]
    pub teens: f64,
    #[serde(rename = "18-24")]
    pub young_adults: f64,
    #[serde(rename = "25-34")]
    pub adults: f64,
    #[serde(rename = "35+")]
    pub mature: f64,
}

impl AgeDistribution {
    #[must_use]
    pub fn share(&self, bracket: AgeBracket) -> f64 {
        match bracket {
            AgeBracket::Teens => self.teens,
            AgeBracket::YoungAdults => self.young_adults,
            AgeBracket::Adults => self.adults,
            AgeBracket::Mature => self.mature,
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        AgeBracket::ALL.iter().map(|&b| self.share(b)).sum()
    }
}

/// Fixed audience regions used by every creator profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Us,
    Ca,
    Uk,
    Au,
    Other,
}

impl Region {
    pub const ALL: [Region; 5] = [Region::Us, Region::Ca, Region::Uk, Region::Au, Region::Other];
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Us => write!(f, "US"),
            Region::Ca => write!(f, "CA"),
            Region::Uk => write!(f, "UK"),
            Region::Au => write!(f, "AU"),
            Region::Other => write!(f, "other"),
        }
    }
}

/// Share of a creator's audience in each [`Region`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoDistribution {
    #[serde(rename = "US")]
    pub us: f64,
    #[serde(rename = "CA")]
    pub ca: f64,
    #[serde(rename = "UK")]
    pub uk: f64,
    #[serde(rename = "AU")]
    pub au: f64,
    pub other: f64,
}

impl GeoDistribution {
    #[must_use]
    pub fn share(&self, region: Region) -> f64 {
        match region {
            Region::Us => self.us,
            Region::Ca => self.ca,
            Region::Uk => self.uk,
            Region::Au => self.au,
            Region::Other => self.other,
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        Region::ALL.iter().map(|&r| self.share(r)).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SafetyTier {
    Clean,
    MinorFlags,
    MajorFlags,
}

impl std::fmt::Display for SafetyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyTier::Clean => write!(f, "clean"),
            SafetyTier::MinorFlags => write!(f, "minor-flags"),
            SafetyTier::MajorFlags => write!(f, "major-flags"),
        }
    }
}

/// Historical engagement by content format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentHistory {
    pub reel: f64,
    #[serde(rename = "static")]
    pub static_post: f64,
    pub story: f64,
    pub avg_views: u64,
}

/// Raw inputs to the fraud-risk classifier. Each value is a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FraudIndicators {
    pub spike_frequency: f64,
    pub bot_ratio: f64,
    pub repetitive_comments: f64,
}

/// A candidate creator from the reference catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: u32,
    pub name: String,
    pub handle: String,
    pub platform: String,
    pub followers: u64,
    /// Fraction of followers who engage with a post, e.g. `0.048`.
    pub engagement_rate: f64,
    /// Topic tags in display order. Unique per creator.
    pub topics: Vec<String>,
    pub audience: AgeDistribution,
    pub geo: GeoDistribution,
    pub safety: SafetyTier,
    pub history: ContentHistory,
    pub fraud_indicators: FraudIndicators,
}

impl CandidateProfile {
    #[must_use]
    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    Skincare,
    Beauty,
}

impl Vertical {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Vertical::Skincare => "skincare",
            Vertical::Beauty => "beauty",
        }
    }
}

impl std::fmt::Display for Vertical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Winter => write!(f, "winter"),
            Season::Spring => write!(f, "spring"),
            Season::Summer => write!(f, "summer"),
            Season::Autumn => write!(f, "autumn"),
        }
    }
}

impl std::str::FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" => Ok(Season::Autumn),
            other => Err(format!(
                "unknown season '{other}'; expected winter, spring, summer, or autumn"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Reel,
    Static,
    Story,
}

/// Historical campaign averages for one vertical/season/format combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub id: u32,
    pub vertical: Vertical,
    pub season: Season,
    pub post_type: PostType,
    /// Cost per thousand impressions, INR.
    pub avg_cpm: f64,
    pub avg_ctr: f64,
    pub avg_cvr: f64,
}

/// Composite-score weights. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightVector {
    pub relevance: f64,
    pub audience: f64,
    pub engagement: f64,
    pub safety: f64,
    pub consistency: f64,
}

impl WeightVector {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.relevance + self.audience + self.engagement + self.safety + self.consistency
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            relevance: 0.35,
            audience: 0.30,
            engagement: 0.20,
            safety: 0.10,
            consistency: 0.05,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Which side of the marketplace the dashboard belongs to.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Brand,
    Creator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Brand => "brand",
            Role::Creator => "creator",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "brand" => Some(Role::Brand),
            "creator" => Some(Role::Creator),
            _ => None,
        }
    }

    /// Raw field holding the name of the other party.
    pub fn counterpart_field(&self) -> &'static str {
        match self {
            Role::Brand => "creator_name",
            Role::Creator => "brand_name",
        }
    }
}

/// Type-specific money terms of a booking. Serialized with the API's `type`
/// discriminator so a normalized record can be fed back through the
/// normalizer unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum BookingTerms {
    #[serde(rename = "Subscription")]
    Subscription {
        total_cost: Option<f64>,
        duration_months: Option<u32>,
    },
    #[serde(rename = "Sponsor")]
    Sponsor { bid_amount: Option<f64> },
    #[serde(rename = "One-off Partnership")]
    OneOffPartnership {
        price: Option<f64>,
        offer_id: Option<String>,
    },
    #[serde(rename = "Campaign Invite")]
    CampaignInvite {
        bid_amount: Option<f64>,
        campaign_id: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingKind {
    Subscription,
    Sponsor,
    OneOffPartnership,
    CampaignInvite,
}

impl BookingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingKind::Subscription => "Subscription",
            BookingKind::Sponsor => "Sponsor",
            BookingKind::OneOffPartnership => "One-off Partnership",
            BookingKind::CampaignInvite => "Campaign Invite",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "subscription" => Some(BookingKind::Subscription),
            "sponsor" => Some(BookingKind::Sponsor),
            "one-off partnership" => Some(BookingKind::OneOffPartnership),
            "campaign invite" => Some(BookingKind::CampaignInvite),
            _ => None,
        }
    }
}

impl BookingTerms {
    pub fn kind(&self) -> BookingKind {
        match self {
            BookingTerms::Subscription { .. } => BookingKind::Subscription,
            BookingTerms::Sponsor { .. } => BookingKind::Sponsor,
            BookingTerms::OneOffPartnership { .. } => BookingKind::OneOffPartnership,
            BookingTerms::CampaignInvite { .. } => BookingKind::CampaignInvite,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deliverable {
    pub platform: Option<String>,
    pub content_type: Option<String>,
    pub quantity: u32,
    pub submitted: u32,
}

/// UI-ready projection of a raw booking, subscription or invite record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Booking {
    pub id: String,
    #[serde(flatten)]
    pub terms: BookingTerms,
    pub cost: String,
    pub status: String,
    pub content_status: Option<String>,
    pub payment_status: String,
    pub title: String,
    pub counterpart: String,
    pub platform: String,
    pub platforms: Vec<String>,
    pub audience_targets: Vec<String>,
    pub topics: Vec<String>,
    pub deliverables: Vec<Deliverable>,
    pub description: String,
    pub message: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Booking {
    pub fn kind(&self) -> BookingKind {
        self.terms.kind()
    }

    /// Status driving the progress display: content review state wins.
    pub fn display_status(&self) -> &str {
        self.content_status.as_deref().unwrap_or(&self.status)
    }
}

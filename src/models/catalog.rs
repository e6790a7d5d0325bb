use serde::Serialize;

use crate::models::SelectedPlan;

/// Static marketing content for the landing page. The backend owns the
/// purchasable catalog; these tiers exist so a visitor can express intent
/// before authenticating, and their keys line up with the backend's.
#[derive(Debug, Serialize, Clone)]
pub struct LandingPlan {
    pub key: &'static str,
    pub name: &'static str,
    pub price: &'static str,
    pub period: &'static str,
    pub features: &'static [&'static str],
    pub popular: bool,
}

impl LandingPlan {
    pub fn to_selected(&self) -> SelectedPlan {
        SelectedPlan {
            key: self.key.to_string(),
            name: self.name.to_string(),
            price: self.price.to_string(),
            period: self.period.to_string(),
            features: self.features.iter().map(|f| f.to_string()).collect(),
        }
    }
}

pub const LANDING_PLANS: [LandingPlan; 3] = [
    LandingPlan {
        key: "basic",
        name: "Basic",
        price: "₹499",
        period: "month",
        features: &[
            "Profile listing on platform",
            "Up to 20 leads per month",
            "Basic customer support",
            "Mobile app access",
        ],
        popular: false,
    },
    LandingPlan {
        key: "professional",
        name: "Professional",
        price: "₹999",
        period: "month",
        features: &[
            "Featured profile listing",
            "Unlimited leads",
            "Priority customer support",
            "Advanced analytics dashboard",
            "Payment gateway integration",
            "Marketing tools & promotions",
        ],
        popular: true,
    },
    LandingPlan {
        key: "enterprise",
        name: "Enterprise",
        price: "₹1,999",
        period: "month",
        features: &[
            "Premium placement",
            "Unlimited leads",
            "24/7 dedicated support",
            "Advanced analytics & insights",
            "Full marketing suite",
            "Verified & Premium badge",
            "Team management (up to 5 members)",
        ],
        popular: false,
    },
];

pub fn landing_plan(key: &str) -> Option<&'static LandingPlan> {
    LANDING_PLANS.iter().find(|p| p.key == key)
}

#[derive(Debug, Serialize, Clone)]
pub struct ServiceTile {
    pub name: &'static str,
    pub providers: u32,
}

pub const SERVICES: [ServiceTile; 8] = [
    ServiceTile { name: "Plumbing", providers: 234 },
    ServiceTile { name: "Electrical", providers: 189 },
    ServiceTile { name: "Cleaning", providers: 456 },
    ServiceTile { name: "Carpentry", providers: 167 },
    ServiceTile { name: "Painting", providers: 203 },
    ServiceTile { name: "AC Repair", providers: 145 },
    ServiceTile { name: "Pest Control", providers: 98 },
    ServiceTile { name: "Appliance Repair", providers: 176 },
];

pub const LOCATIONS: [&str; 7] = [
    "Wakad",
    "Hinjewadi",
    "Baner / Pashan",
    "Bavdhan",
    "Hadapsar",
    "Kalewadi",
    "Pimple Nilakh",
];

#[derive(Debug, Serialize, Clone)]
pub struct Review {
    pub name: &'static str,
    pub location: &'static str,
    pub rating: u8,
    pub service: &'static str,
    pub text: &'static str,
    pub date: &'static str,
}

pub const REVIEWS: [Review; 3] = [
    Review {
        name: "Priya Sharma",
        location: "Wakad",
        rating: 5,
        service: "Plumbing",
        text: "Found an excellent plumber within minutes. Professional service and reasonable pricing. GharSeva made it so easy!",
        date: "2 days ago",
    },
    Review {
        name: "Rajesh Kumar",
        location: "Hinjewadi",
        rating: 5,
        service: "Electrical Work",
        text: "The electrician was prompt, skilled, and fixed all issues quickly. Great platform for finding reliable service providers.",
        date: "1 week ago",
    },
    Review {
        name: "Anjali Patel",
        location: "Baner",
        rating: 4,
        service: "House Cleaning",
        text: "Very satisfied with the cleaning service. The team was thorough and professional. Will definitely use again.",
        date: "3 days ago",
    },
];

#[derive(Debug, Serialize, Clone)]
pub struct Stat {
    pub number: &'static str,
    pub label: &'static str,
}

pub const STATS: [Stat; 4] = [
    Stat { number: "5,000+", label: "Local Providers" },
    Stat { number: "50K+", label: "Happy Customers" },
    Stat { number: "7", label: "Areas in Pune Covered" },
    Stat { number: "4.9★", label: "Average Rating" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_popular_tier() {
        assert_eq!(LANDING_PLANS.iter().filter(|p| p.popular).count(), 1);
    }

    #[test]
    fn landing_keys_resolve() {
        assert!(landing_plan("professional").is_some());
        assert!(landing_plan("platinum").is_none());
    }
}

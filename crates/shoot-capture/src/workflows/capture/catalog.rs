use serde::Serialize;

use super::domain::CategoryId;

/// Static definition of a shot category.
#[derive(Debug, Clone, Serialize)]
pub struct ShotCategory {
    pub id: CategoryId,
    pub label: &'static str,
    pub icon: &'static str,
    pub required: bool,
    pub min_shots: u32,
    /// Advisory ceiling; captures beyond it are allowed.
    pub max_shots: u32,
    pub tips: &'static [&'static str],
}

/// All categories in recommendation priority order.
pub fn catalog() -> &'static [ShotCategory] {
    &CATALOG
}

pub fn category(id: CategoryId) -> &'static ShotCategory {
    &CATALOG[id as usize]
}

/// Resolve a raw identifier such as `"kitchen"`; unknown identifiers yield `None`.
pub fn find_category(raw: &str) -> Option<&'static ShotCategory> {
    let needle = raw.trim();
    CATALOG
        .iter()
        .find(|category| category.id.as_str().eq_ignore_ascii_case(needle))
}

pub fn required_categories() -> impl Iterator<Item = &'static ShotCategory> {
    CATALOG.iter().filter(|category| category.required)
}

static CATALOG: [ShotCategory; 15] = [
    ShotCategory {
        id: CategoryId::ExteriorFront,
        label: "Front Exterior",
        icon: "home",
        required: true,
        min_shots: 3,
        max_shots: 6,
        tips: &[
            "Shoot from the street corners at a slight angle to show depth.",
            "Capture the full roofline and keep verticals straight.",
            "Move vehicles and bins out of frame before shooting.",
        ],
    },
    ShotCategory {
        id: CategoryId::ExteriorRear,
        label: "Rear Exterior",
        icon: "home-back",
        required: true,
        min_shots: 2,
        max_shots: 4,
        tips: &[
            "Show how the rear elevation connects to the yard or patio.",
            "Avoid shooting directly into the sun.",
        ],
    },
    ShotCategory {
        id: CategoryId::LivingRoom,
        label: "Living Room",
        icon: "sofa",
        required: true,
        min_shots: 3,
        max_shots: 6,
        tips: &[
            "Shoot from doorways and corners to show the full layout.",
            "Turn on every lamp and open the blinds.",
            "Keep the camera at chest height.",
        ],
    },
    ShotCategory {
        id: CategoryId::Kitchen,
        label: "Kitchen",
        icon: "utensils",
        required: true,
        min_shots: 3,
        max_shots: 6,
        tips: &[
            "Clear countertops of small appliances and clutter.",
            "Capture the island and the main work triangle in one frame.",
            "Add a detail shot of premium finishes or appliances.",
        ],
    },
    ShotCategory {
        id: CategoryId::PrimaryBedroom,
        label: "Primary Bedroom",
        icon: "bed",
        required: true,
        min_shots: 2,
        max_shots: 4,
        tips: &[
            "Shoot toward the windows to show natural light.",
            "Make the bed and remove personal items from nightstands.",
        ],
    },
    ShotCategory {
        id: CategoryId::PrimaryBathroom,
        label: "Primary Bathroom",
        icon: "bath",
        required: true,
        min_shots: 2,
        max_shots: 4,
        tips: &[
            "Close the toilet lid and hide toiletries.",
            "Check mirrors for reflections of the camera.",
        ],
    },
    ShotCategory {
        id: CategoryId::DiningRoom,
        label: "Dining Room",
        icon: "chair",
        required: false,
        min_shots: 1,
        max_shots: 3,
        tips: &["Center the table and show its relationship to the kitchen."],
    },
    ShotCategory {
        id: CategoryId::Bedroom,
        label: "Additional Bedrooms",
        icon: "bed-single",
        required: false,
        min_shots: 1,
        max_shots: 8,
        tips: &[
            "One wide shot per bedroom is usually enough.",
            "Include closets when they are a selling point.",
        ],
    },
    ShotCategory {
        id: CategoryId::Bathroom,
        label: "Additional Bathrooms",
        icon: "shower",
        required: false,
        min_shots: 1,
        max_shots: 6,
        tips: &["Shoot from the doorway and keep the vanity level."],
    },
    ShotCategory {
        id: CategoryId::FamilyRoom,
        label: "Family Room",
        icon: "tv",
        required: false,
        min_shots: 1,
        max_shots: 4,
        tips: &["Turn off televisions and screens before shooting."],
    },
    ShotCategory {
        id: CategoryId::Backyard,
        label: "Backyard & Outdoor Living",
        icon: "tree",
        required: false,
        min_shots: 1,
        max_shots: 5,
        tips: &[
            "Show patios, decks and pools from an elevated angle when possible.",
            "Stage outdoor furniture before shooting.",
        ],
    },
    ShotCategory {
        id: CategoryId::Garage,
        label: "Garage",
        icon: "car",
        required: false,
        min_shots: 1,
        max_shots: 3,
        tips: &["Open the garage door for exterior context when it is tidy."],
    },
    ShotCategory {
        id: CategoryId::Amenities,
        label: "Community Amenities",
        icon: "pool",
        required: false,
        min_shots: 1,
        max_shots: 6,
        tips: &["Capture shared pools, gyms and clubhouses listed in the description."],
    },
    ShotCategory {
        id: CategoryId::Aerial,
        label: "Aerial",
        icon: "drone",
        required: false,
        min_shots: 1,
        max_shots: 5,
        tips: &[
            "Confirm airspace authorization before launching.",
            "Frame the lot lines and nearby landmarks.",
        ],
    },
    ShotCategory {
        id: CategoryId::Details,
        label: "Detail Shots",
        icon: "camera",
        required: false,
        min_shots: 1,
        max_shots: 10,
        tips: &["Highlight fixtures, hardware and architectural details up close."],
    },
];

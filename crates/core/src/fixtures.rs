//! Seed catalog for the women's salon service page.

use rust_decimal::Decimal;

use crate::domain::package::{
    AddonDefinition, AddonRef, Choice, OptionGroup, Package, PackageId, RecommendationRule,
    RuleTrigger, ADDONS_GROUP,
};
use crate::domain::service::{Service, ServiceId};

const PACKAGE_IMAGE: &str = "/placeholder.svg?height=200&width=300";

struct ChoiceSeed {
    id: &'static str,
    name: &'static str,
    price: i64,
    description: &'static str,
}

struct GroupSeed {
    name: &'static str,
    required: bool,
    choices: &'static [ChoiceSeed],
}

enum TargetSeed {
    Catalog(&'static str),
    Inline(ChoiceSeed),
}

struct RuleSeed {
    group: &'static str,
    choice: &'static str,
    target: TargetSeed,
    reason: &'static str,
    match_score: u8,
}

struct PackageSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    base_price: i64,
    groups: &'static [GroupSeed],
    rules: &'static [RuleSeed],
}

const SALON_PACKAGES: &[PackageSeed] = &[
    PackageSeed {
        id: "facial",
        name: "Facial",
        description: "Rejuvenate your skin with our premium facials",
        base_price: 999,
        groups: &[
            GroupSeed {
                name: "Type",
                required: true,
                choices: &[
                    ChoiceSeed {
                        id: "fruit",
                        name: "Fruit Facial",
                        price: 0,
                        description: "Natural fruit extracts for gentle cleansing",
                    },
                    ChoiceSeed {
                        id: "gold",
                        name: "Gold Facial",
                        price: 500,
                        description: "24K gold-infused for radiant skin",
                    },
                    ChoiceSeed {
                        id: "diamond",
                        name: "Diamond Facial",
                        price: 1000,
                        description: "Premium diamond dust for deep exfoliation",
                    },
                ],
            },
            GroupSeed {
                name: ADDONS_GROUP,
                required: false,
                choices: &[
                    ChoiceSeed {
                        id: "massage",
                        name: "Face Massage (10 mins)",
                        price: 299,
                        description: "Relaxing massage to improve circulation",
                    },
                    ChoiceSeed {
                        id: "mask",
                        name: "Premium Face Mask",
                        price: 399,
                        description: "Hydrating mask for glowing skin",
                    },
                ],
            },
        ],
        rules: &[
            RuleSeed {
                group: "Type",
                choice: "gold",
                target: TargetSeed::Catalog("mask"),
                reason: "Enhance your Gold Facial with our Premium Face Mask for ultimate hydration",
                match_score: 90,
            },
            RuleSeed {
                group: "Type",
                choice: "diamond",
                target: TargetSeed::Catalog("massage"),
                reason: "Complete your Diamond Facial with a relaxing Face Massage",
                match_score: 95,
            },
            RuleSeed {
                group: "Type",
                choice: "diamond",
                target: TargetSeed::Inline(ChoiceSeed {
                    id: "eye-treatment",
                    name: "Eye Treatment",
                    price: 349,
                    description: "Special treatment for the delicate eye area",
                }),
                reason: "Diamond Facial clients often add our specialized Eye Treatment",
                match_score: 85,
            },
            RuleSeed {
                group: "Type",
                choice: "fruit",
                target: TargetSeed::Inline(ChoiceSeed {
                    id: "neck-treatment",
                    name: "Neck Treatment",
                    price: 299,
                    description: "Extended care for your neck area",
                }),
                reason: "Complete your Fruit Facial with our nourishing Neck Treatment",
                match_score: 80,
            },
        ],
    },
    PackageSeed {
        id: "haircut",
        name: "Haircut & Styling",
        description: "Get a trendy haircut and styling by experts",
        base_price: 699,
        groups: &[
            GroupSeed {
                name: "Length",
                required: true,
                choices: &[
                    ChoiceSeed {
                        id: "short",
                        name: "Short Hair",
                        price: 0,
                        description: "For hair length up to shoulders",
                    },
                    ChoiceSeed {
                        id: "medium",
                        name: "Medium Hair",
                        price: 100,
                        description: "For hair length up to mid-back",
                    },
                    ChoiceSeed {
                        id: "long",
                        name: "Long Hair",
                        price: 200,
                        description: "For hair length below mid-back",
                    },
                ],
            },
            GroupSeed {
                name: ADDONS_GROUP,
                required: false,
                choices: &[
                    ChoiceSeed {
                        id: "styling",
                        name: "Hair Styling",
                        price: 299,
                        description: "Professional styling after haircut",
                    },
                    ChoiceSeed {
                        id: "treatment",
                        name: "Hair Treatment",
                        price: 499,
                        description: "Deep conditioning treatment",
                    },
                ],
            },
        ],
        rules: &[
            RuleSeed {
                group: "Length",
                choice: "long",
                target: TargetSeed::Catalog("treatment"),
                reason: "Long hair benefits greatly from our deep conditioning treatment",
                match_score: 90,
            },
            RuleSeed {
                group: "Length",
                choice: "medium",
                target: TargetSeed::Catalog("styling"),
                reason: "Medium length hair looks amazing with professional styling",
                match_score: 85,
            },
            RuleSeed {
                group: "Length",
                choice: "long",
                target: TargetSeed::Inline(ChoiceSeed {
                    id: "hair-spa",
                    name: "Hair Spa",
                    price: 599,
                    description: "Luxurious hair spa treatment for healthy, shiny hair",
                }),
                reason: "Our Hair Spa is perfect for maintaining long hair health",
                match_score: 95,
            },
            RuleSeed {
                group: "Length",
                choice: "short",
                target: TargetSeed::Inline(ChoiceSeed {
                    id: "color-touch",
                    name: "Color Touch-Up",
                    price: 499,
                    description: "Quick color refresh for your roots",
                }),
                reason: "Short hair styles look even better with a fresh color touch",
                match_score: 80,
            },
        ],
    },
    PackageSeed {
        id: "waxing",
        name: "Waxing",
        description: "Smooth and hair-free skin with our waxing services",
        base_price: 599,
        groups: &[
            GroupSeed {
                name: "Type",
                required: true,
                choices: &[
                    ChoiceSeed {
                        id: "regular",
                        name: "Regular Wax",
                        price: 0,
                        description: "Standard waxing procedure",
                    },
                    ChoiceSeed {
                        id: "rica",
                        name: "Rica Wax",
                        price: 200,
                        description: "Premium Italian wax for sensitive skin",
                    },
                    ChoiceSeed {
                        id: "chocolate",
                        name: "Chocolate Wax",
                        price: 300,
                        description: "Aromatic chocolate wax for extra smoothness",
                    },
                ],
            },
            GroupSeed {
                name: "Area",
                required: true,
                choices: &[
                    ChoiceSeed {
                        id: "full-arms",
                        name: "Full Arms",
                        price: 0,
                        description: "Complete arm waxing",
                    },
                    ChoiceSeed {
                        id: "half-arms",
                        name: "Half Arms",
                        price: -100,
                        description: "Waxing from elbow to wrist",
                    },
                    ChoiceSeed {
                        id: "full-legs",
                        name: "Full Legs",
                        price: 200,
                        description: "Complete leg waxing",
                    },
                    ChoiceSeed {
                        id: "half-legs",
                        name: "Half Legs",
                        price: 100,
                        description: "Waxing from knee to ankle",
                    },
                ],
            },
            GroupSeed {
                name: ADDONS_GROUP,
                required: false,
                choices: &[
                    ChoiceSeed {
                        id: "underarms",
                        name: "Underarms",
                        price: 199,
                        description: "Underarm waxing",
                    },
                    ChoiceSeed {
                        id: "moisturizer",
                        name: "Premium Moisturizer",
                        price: 149,
                        description: "Soothing moisturizer application after waxing",
                    },
                ],
            },
        ],
        rules: &[
            RuleSeed {
                group: "Area",
                choice: "full-legs",
                target: TargetSeed::Catalog("moisturizer"),
                reason: "Soothe your skin after full legs waxing with our premium moisturizer",
                match_score: 90,
            },
            RuleSeed {
                group: "Type",
                choice: "chocolate",
                target: TargetSeed::Catalog("underarms"),
                reason: "Many clients add underarm waxing with our premium chocolate wax",
                match_score: 85,
            },
            RuleSeed {
                group: "Area",
                choice: "full-arms",
                target: TargetSeed::Inline(ChoiceSeed {
                    id: "tan-removal",
                    name: "Tan Removal",
                    price: 349,
                    description: "Removes tan and brightens skin",
                }),
                reason: "Full arms waxing pairs perfectly with our tan removal treatment",
                match_score: 90,
            },
            RuleSeed {
                group: "Type",
                choice: "rica",
                target: TargetSeed::Inline(ChoiceSeed {
                    id: "anti-ingrowth",
                    name: "Anti-Ingrowth Serum",
                    price: 249,
                    description: "Prevents ingrown hair after waxing",
                }),
                reason: "Rica wax clients love our Anti-Ingrowth Serum for best results",
                match_score: 95,
            },
        ],
    },
];

fn choice(seed: &ChoiceSeed) -> Choice {
    Choice {
        id: seed.id.to_owned(),
        name: seed.name.to_owned(),
        price: Decimal::from(seed.price),
        description: Some(seed.description.to_owned()),
    }
}

fn package(seed: &PackageSeed) -> Package {
    Package {
        id: PackageId(seed.id.to_owned()),
        name: seed.name.to_owned(),
        description: seed.description.to_owned(),
        base_price: Decimal::from(seed.base_price),
        image: Some(PACKAGE_IMAGE.to_owned()),
        options: seed
            .groups
            .iter()
            .map(|group| OptionGroup {
                name: group.name.to_owned(),
                required: group.required,
                choices: group.choices.iter().map(choice).collect(),
            })
            .collect(),
        rules: seed
            .rules
            .iter()
            .map(|rule| RecommendationRule {
                trigger: RuleTrigger {
                    group: rule.group.to_owned(),
                    choice: rule.choice.to_owned(),
                },
                recommend: match &rule.target {
                    TargetSeed::Catalog(addon_id) => AddonRef::Catalog((*addon_id).to_owned()),
                    TargetSeed::Inline(seed) => AddonRef::Inline(AddonDefinition::from(&choice(seed))),
                },
                reason: rule.reason.to_owned(),
                match_score: rule.match_score,
            })
            .collect(),
    }
}

pub fn seed_services() -> Vec<Service> {
    vec![Service {
        id: ServiceId("salon-women".to_owned()),
        name: "Salon for Women".to_owned(),
        description: "Professional salon services in the comfort of your home".to_owned(),
        image: Some("https://i.postimg.cc/D05bRTd2/women-salon-hyphomz.avif".to_owned()),
        rating: 4.8,
        rating_count: 12_453,
        packages: SALON_PACKAGES.iter().map(package).collect(),
    }]
}

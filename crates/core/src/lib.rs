pub mod cart;
pub mod checkout;
pub mod config;
pub mod configurator;
pub mod domain;
pub mod errors;
pub mod fixtures;

pub use cart::storage::{CartStorage, JsonFileCartStorage, MemoryCartStorage};
pub use cart::CartStore;
pub use checkout::{submit_order, CheckoutPolicy, CheckoutSummary, OrderConfirmation, OrderId};
pub use configurator::breakdown::{
    Breakdown, BreakdownKind, DeterministicPricingEngine, PriceBreakdownItem, PricingEngine,
};
pub use configurator::catalog::Catalog;
pub use configurator::hints::{HintLog, HintSink, NoopHints, PresentationHint};
pub use configurator::recommendations::{
    RecommendationEngine, RecommendedAddon, Recommendations, RuleRecommendationEngine,
};
pub use configurator::selection::{QuantityLimits, SelectionAction, SelectionState};
pub use configurator::{Configurator, ConfiguratorSettings};
pub use domain::booking::{
    AddressType, BookingRequest, ContactDetails, PaymentMethod, ServiceAddress, TimeSlot,
};
pub use domain::cart::{CartItem, CartItemId, CartOption};
pub use domain::package::{
    AddonDefinition, AddonRef, Choice, OptionGroup, Package, PackageId, RecommendationRule,
};
pub use domain::service::{Service, ServiceId};
pub use errors::{ApplicationError, DomainError, InterfaceError};

pub mod builder;
pub mod iterative;
pub mod referral;

pub use builder::ResolverBuilder;
pub use iterative::IterativeResolver;

pub mod owner_profile;
pub mod scan;

pub use owner_profile::{Activity, Experience, Housing, OwnerProfile, Suitability};
pub use scan::{AlternateBreed, AnalysisResult, ScanRecord};

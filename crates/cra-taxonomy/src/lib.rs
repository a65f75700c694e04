pub mod consultation;
pub mod error;
pub mod registry;
pub mod taxonomy;

pub use consultation::ConsultationMapping;
pub use error::TaxonomyError;
pub use registry::{TaxonomyRegistry, load_consultations_csv, load_taxonomy_csv};
pub use taxonomy::{Specialty, TaxonomyNode};

//! Fact table types, CSV loading/writing and star-schema export

mod record;
pub mod loader;
pub mod schema;
pub mod writer;

pub use record::{loss_ratio, Dataset, LossRecord};
pub use loader::{load_dataset, load_dataset_from_reader};
pub use schema::{write_star_schema, StarSchema};
pub use writer::{write_dataset, write_dataset_to_writer, FACT_TABLE_FILE};

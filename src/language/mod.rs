// Language tool registry: per-file-type parser, tool, server and formatter
// declarations and their aggregation

pub mod aggregate;
pub mod entry;
pub mod formatter;
pub mod registry;

pub use aggregate::{Aggregate, Aggregator};
pub use entry::{LanguageEntry, Options, OTHER_FILE_TYPE};
pub use formatter::{FormatterDecl, FormatterSpec, ResolvedChain};
pub use registry::{LanguageRegistry, RegistryBuilder};

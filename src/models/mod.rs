pub mod attachment;
pub mod category;
pub mod comment;
pub mod issue;
pub mod issue_type;
pub mod priority;
pub mod project;
pub mod space;
pub mod status;

pub use attachment::*;
pub use category::*;
pub use comment::*;
pub use issue::*;
pub use issue_type::*;
pub use priority::*;
pub use project::*;
pub use space::*;
pub use status::*;

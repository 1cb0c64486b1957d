pub mod upload;

pub use upload::{upload_multiple, upload_single, MultiUploadForm, SingleUploadForm};
pub use upload::{__path_upload_multiple, __path_upload_single};

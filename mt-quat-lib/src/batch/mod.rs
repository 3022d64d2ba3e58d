mod convert_folder;
mod mt_export_name;

pub use convert_folder::{
    convert_file, convert_folder, discover_mt_exports, BatchReport, FileOutcome, FileReport,
};
pub use mt_export_name::is_mt_export_name;

pub mod students;

pub use students::{
    import_file, parse_students, parse_students_str, ImportReport, RowError, StudentRecord,
};

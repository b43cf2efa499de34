pub mod activity_reader;
pub mod summary_writer;
pub mod toptal_reader;
pub mod toptal_writer;

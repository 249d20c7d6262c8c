pub mod formatter;
pub mod io;

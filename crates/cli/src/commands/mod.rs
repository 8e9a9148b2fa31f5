pub(crate) mod books;
pub(crate) mod serve;
pub(crate) mod shell;

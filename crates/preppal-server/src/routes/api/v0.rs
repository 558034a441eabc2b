pub(crate) mod artifacts;
pub(crate) mod flashcards;
pub(crate) mod process;
pub(crate) mod quizzes;
pub(crate) mod status;
pub(crate) mod summaries;
pub(crate) mod uploads;
pub(crate) mod user;

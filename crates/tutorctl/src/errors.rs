//! Exit codes for tutorctl

/// Exit code for success (and a correct `check` answer)
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when `check` receives a wrong answer
pub const EXIT_INCORRECT_ANSWER: i32 = 2;

/// Exit code when `check` targets a concept without questions
pub const EXIT_NO_QUESTION: i32 = 3;

/// Exit code when the ontology cannot be loaded
pub const EXIT_LOAD_FAILED: i32 = 66;

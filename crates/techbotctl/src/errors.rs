//! Error codes and exit status for techbotctl
//!
//! Standard exit codes for the different failure modes. A fallback
//! diagnosis ("could not pin down") is a normal outcome, not an error.

/// Exit code for success (diagnosed or fallback outcome)
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the knowledge corpus cannot be loaded
pub const EXIT_CORPUS_UNREADABLE: i32 = 65;

/// Exit code when `explain` names an issue the corpus does not know
pub const EXIT_UNKNOWN_ISSUE: i32 = 66;

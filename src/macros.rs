//! Logging macros

/// Macro for conditional logging that avoids allocation when feature is disabled
///
/// The message is formatted only when the logger would keep it. When the
/// verbose-logging feature is disabled, this becomes a no-op at compile
/// time; the arguments are still type-checked so bindings that only feed a
/// log line do not turn into unused variables.
///
/// ```ignore
/// log_if_verbose!(self.logger, Verbose, "Turn {}", turn);
/// log_if_verbose!(category = "ai_choice", logger, Verbose, "{} passes", name);
/// ```
macro_rules! log_if_verbose {
    (@log $category:expr, $logger:expr, $level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "verbose-logging")]
        {
            let logger: &$crate::game::GameLogger = &$logger;
            let level = $crate::game::VerbosityLevel::$level;
            if logger.enabled(level) {
                logger.log(level, &format!($($arg)*), $category);
            }
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            if false {
                let _ = (&$logger, format!($($arg)*));
            }
        }
    }};
    (category = $category:literal, $logger:expr, $level:ident, $($arg:tt)*) => {
        log_if_verbose!(@log Some($category), $logger, $level, $($arg)*)
    };
    ($logger:expr, $level:ident, $($arg:tt)*) => {
        log_if_verbose!(@log None, $logger, $level, $($arg)*)
    };
}

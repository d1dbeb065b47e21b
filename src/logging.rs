// Cornerstones – A word search game
// Copyright (C) 2024  Neil Roberts
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use tracing::level_filters::LevelFilter;

/// Picks the log level from the number of `-v` flags, starting from
/// info. Any `-q` wins and only leaves errors.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }

    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// A subscriber that sends log messages to stderr so that stdout only
/// has the program’s output
pub fn subscriber(
    verbose: u8,
    quiet: bool,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_max_level(level_for(verbose, quiet))
        .with_writer(std::io::stderr)
        .finish()
}

/// Installs [`subscriber`] globally. Calling it a second time does
/// nothing.
pub fn init(verbose: u8, quiet: bool) {
    let _ = tracing::subscriber::set_global_default(
        subscriber(verbose, quiet)
    );
}

#[cfg(test)]
mod test {
    use super::*;
    use tracing::Level;

    #[test]
    fn levels() {
        assert_eq!(level_for(0, false), LevelFilter::INFO);
        assert_eq!(level_for(1, false), LevelFilter::DEBUG);
        assert_eq!(level_for(2, false), LevelFilter::TRACE);
        assert_eq!(level_for(7, false), LevelFilter::TRACE);
        assert_eq!(level_for(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn scoped_subscriber() {
        // Only installed for this thread so other tests aren’t affected
        tracing::subscriber::with_default(subscriber(1, false), || {
            assert!(tracing::enabled!(Level::DEBUG));
            assert!(!tracing::enabled!(Level::TRACE));
        });

        tracing::subscriber::with_default(subscriber(0, true), || {
            assert!(tracing::enabled!(Level::ERROR));
            assert!(!tracing::enabled!(Level::WARN));
        });
    }
}

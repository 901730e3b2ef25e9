// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// satzwerk-exec — The single shell-execution primitive every Satzwerk
// operation delegates to. Runs a command line through `sh -c`, captures
// stdout/stderr, and maps a non-zero exit into a structured error.

mod runner;

pub use runner::{CmdOutput, quoted, run};

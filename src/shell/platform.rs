//! Platform-specific process setup.

use std::process::{Command, ExitStatus};

/// Lower the scheduling priority of a command before it execs.
///
/// Best-effort: a failing `nice(2)` leaves the priority unchanged.
pub fn lower_priority(cmd: &mut Command, niceness: i32) {
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;

        // SAFETY: nice() is async-signal-safe and touches no Rust state,
        // so it may run between fork and exec.
        unsafe {
            cmd.pre_exec(move || {
                libc::nice(niceness);
                Ok(())
            });
        }
    }

    #[cfg(not(unix))]
    {
        let _ = (cmd, niceness);
    }
}

/// Exit code of a finished process; `128 + signal` when killed by a signal.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn lowered_priority_is_inherited() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "nice"]);
        lower_priority(&mut cmd, 19);

        let output = cmd.output().unwrap();
        let niceness: i32 = String::from_utf8_lossy(&output.stdout).trim().parse().unwrap();

        assert!(niceness > 0);
    }

    #[test]
    fn exit_code_of_normal_exit() {
        let status = Command::new("sh").args(["-c", "exit 6"]).status().unwrap();
        assert_eq!(exit_code(status), 6);
    }

    #[cfg(unix)]
    #[test]
    fn exit_code_of_signalled_process() {
        let status = Command::new("sh")
            .args(["-c", "kill -9 $$"])
            .status()
            .unwrap();
        assert_eq!(exit_code(status), 128 + 9);
    }
}

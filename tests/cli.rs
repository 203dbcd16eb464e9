use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn selpg() -> Command {
    Command::cargo_bin("selpg").expect("binary exists")
}

fn numbered_lines(n: u32) -> String {
    (1..=n).map(|i| format!("line {}\n", i)).collect()
}

fn input_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn help_displays_usage() {
    selpg()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--startPage"));
}

#[test]
fn selects_line_pages_from_file() {
    let file = input_file(numbered_lines(150).as_bytes());
    selpg()
        .args(["-s1", "-e2"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(numbered_lines(144));
}

#[test]
fn selects_line_pages_from_stdin() {
    selpg()
        .args(["-s2", "-e2", "-l3"])
        .write_stdin(numbered_lines(9))
        .assert()
        .success()
        .stdout("line 4\nline 5\nline 6\n");
}

#[test]
fn selects_form_feed_page() {
    selpg()
        .args(["-f", "-s2", "-e2"])
        .write_stdin("A\x0CB\x0CC\x0C")
        .assert()
        .success()
        .stdout("B\x0C");
}

#[test]
fn missing_range_is_an_error() {
    for args in [&["-s1"][..], &["-e1"][..], &[][..]] {
        selpg()
            .args(args)
            .write_stdin("x\n")
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("--startPage and --endPage"));
    }
}

#[test]
fn invalid_range_is_an_error() {
    selpg()
        .args(["-s0", "-e1"])
        .write_stdin("x\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid start page 0"));

    selpg()
        .args(["-s", "-2", "-e1"])
        .write_stdin("x\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid start page -2"));

    selpg()
        .args(["-s3", "-e2"])
        .write_stdin("x\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid end page 2"));

    selpg()
        .args(["-s1", "-e2", "-l0"])
        .write_stdin("x\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid page length 0"));
}

#[test]
fn end_page_beyond_input_keeps_output() {
    selpg()
        .args(["-s1", "-e5", "-l2"])
        .write_stdin("a\nb\nc\nd\n")
        .assert()
        .failure()
        .stdout("a\nb\nc\nd\n")
        .stderr(predicate::str::contains("end page 5 is beyond the end of the input"));
}

#[test]
fn start_page_beyond_input() {
    selpg()
        .args(["-f", "-s3", "-e3"])
        .write_stdin("A\x0CB\x0C")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("start page 3 is beyond the end of the input"));
}

#[test]
fn missing_input_file() {
    selpg()
        .args(["-s1", "-e1", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open input file"));
}

#[test]
fn same_input_same_output() {
    let file = input_file(numbered_lines(500).as_bytes());
    let first = selpg()
        .args(["-s2", "-e4", "-l50"])
        .arg(file.path())
        .output()
        .unwrap();
    let second = selpg()
        .args(["-s2", "-e4", "-l50"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[cfg(unix)]
mod destination {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    /// Write a script into `dir` that copies its standard input to `captured.txt`.
    fn capture_script(dir: &Path, exit_code: i32) {
        let script = dir.join("capture.sh");
        fs::write(
            &script,
            format!("#!/bin/sh\ncat > captured.txt\nexit {}\n", exit_code),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn pipes_pages_into_destination() {
        let dir = tempfile::tempdir().unwrap();
        capture_script(dir.path(), 0);
        let input = numbered_lines(20);

        let console = selpg()
            .args(["-s2", "-e3", "-l5"])
            .write_stdin(input.clone())
            .output()
            .unwrap();

        selpg()
            .current_dir(dir.path())
            .args(["-s2", "-e3", "-l5", "-d", "capture.sh"])
            .write_stdin(input)
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let captured = fs::read(dir.path().join("captured.txt")).unwrap();
        assert_eq!(
            String::from_utf8(captured.clone()).unwrap(),
            "\x0Cline 6\nline 7\nline 8\nline 9\nline 10\n\x0C\
             line 11\nline 12\nline 13\nline 14\nline 15\n\x0C"
        );
        let stripped: Vec<u8> = captured.into_iter().filter(|&b| b != b'\x0C').collect();
        assert_eq!(stripped, console.stdout);
    }

    #[test]
    fn form_feed_pages_into_destination() {
        let dir = tempfile::tempdir().unwrap();
        capture_script(dir.path(), 0);

        selpg()
            .current_dir(dir.path())
            .args(["-f", "-s1", "-e2", "-d", "capture.sh"])
            .write_stdin("A\x0CB\x0CC")
            .assert()
            .success();

        let captured = fs::read(dir.path().join("captured.txt")).unwrap();
        assert_eq!(captured, b"A\x0CB\x0C");
    }

    #[test]
    fn destination_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        capture_script(dir.path(), 3);

        selpg()
            .current_dir(dir.path())
            .args(["-s1", "-e1", "-d", "capture.sh"])
            .write_stdin("a\n")
            .assert()
            .failure()
            .stderr(predicate::str::contains("destination `./capture.sh` failed"));
    }

    #[test]
    fn destination_exiting_early_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("reject.sh");
        fs::write(&script, "#!/bin/sh\nexit 3\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        let file = input_file(numbered_lines(300_000).as_bytes());

        selpg()
            .current_dir(dir.path())
            .args(["-s1", "-e100000", "-l10", "-d", "reject.sh"])
            .arg(file.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("destination `./reject.sh` failed"))
            .stderr(predicate::str::contains("exit status: 3"))
            .stderr(predicate::str::contains("Broken pipe").not());
    }

    #[test]
    fn missing_destination_is_reported() {
        let dir = tempfile::tempdir().unwrap();

        selpg()
            .current_dir(dir.path())
            .args(["-s1", "-e1", "-d", "nowhere.sh"])
            .write_stdin("a\n")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to start destination"));
    }
}

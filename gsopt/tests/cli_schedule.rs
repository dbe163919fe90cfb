#[cfg(test)]
mod test {
    use assert_cmd::Command;
    use predicates::str::contains;
    use rstest::{fixture, rstest};

    #[fixture]
    fn cmd() -> Command {
        let mut cmd = Command::cargo_bin("gsopt").unwrap();
        cmd.arg("schedule");
        cmd
    }

    #[rstest]
    fn chain(mut cmd: Command) {
        let out = cmd.arg("tests/data/chain.json").assert().success();
        let report: serde_json::Value =
            serde_json::from_slice(&out.get_output().stdout).unwrap();
        assert_eq!(report["order"], serde_json::json!(["p0", "p1", "p2", "p3"]));
        assert_eq!(report["register_size"], 2);
    }

    #[rstest]
    fn reduce_first(mut cmd: Command) {
        let out = cmd
            .arg("tests/data/wire.json")
            .arg("--reduce")
            .assert()
            .success();
        let report: serde_json::Value =
            serde_json::from_slice(&out.get_output().stdout).unwrap();
        assert_eq!(report["order"], serde_json::json!(["a", "o"]));
        assert_eq!(report["register_size"], 2);
    }

    #[rstest]
    fn cyclic(mut cmd: Command) {
        cmd.arg("tests/data/cyclic.json")
            .assert()
            .failure()
            .stderr(contains("cyclic dependencies"));
    }
}

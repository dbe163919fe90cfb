#[cfg(test)]
mod test {
    use assert_cmd::Command;
    use gsopt::json::read_graph_state;
    use predicates::str::contains;
    use rstest::{fixture, rstest};

    const K4: &str = "tests/data/k4.json";

    #[fixture]
    fn cmd() -> Command {
        let mut cmd = Command::cargo_bin("gsopt").unwrap();
        cmd.arg("opt");
        cmd
    }

    fn report(cmd: &mut Command) -> serde_json::Value {
        let out = cmd.assert().success();
        serde_json::from_slice(&out.get_output().stdout).unwrap()
    }

    #[rstest]
    fn default(mut cmd: Command) {
        let r = report(cmd.arg(K4));
        assert_eq!(r["objective"], "edges");
        assert_eq!(r["initial"]["edge_count"], 6);
        assert_eq!(r["best"]["edge_count"], 3);
        assert_eq!(r["pivots"], serde_json::json!(["n0"]));
        assert_eq!(r["exhausted"], false);
    }

    #[rstest]
    #[case(&["--bfs"])]
    #[case(&["--all"])]
    #[case(&["--reverse"])]
    #[case(&["--parallel"])]
    #[case(&["--bfs", "--all", "--parallel"])]
    fn strategies(mut cmd: Command, #[case] flags: &[&str]) {
        let r = report(cmd.arg(K4).args(flags));
        assert_eq!(r["best"]["edge_count"], 3);
    }

    #[rstest]
    #[case("max-degree")]
    #[case("degree-norm")]
    #[case("register-size")]
    fn objectives(mut cmd: Command, #[case] objective: &str) {
        let r = report(cmd.arg(K4).arg("--objective").arg(objective));
        assert_eq!(r["objective"], objective);
        assert!(r["best"]["max_degree"].as_u64().unwrap() <= 3);
    }

    #[rstest]
    fn budget(mut cmd: Command) {
        let r = report(cmd.arg(K4).args(["--all", "--budget", "2"]));
        assert_eq!(r["visits"], 3);
        assert_eq!(r["exhausted"], true);
    }

    #[rstest]
    fn out_and_trace(mut cmd: Command) {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("best.json");
        let trace = dir.path().join("trace.json");
        let r = report(cmd.arg(K4).arg("--out").arg(&out).arg("--trace").arg(&trace));

        let (g, _) = read_graph_state(&out).unwrap();
        assert_eq!(g.num_edges(), 3);

        let t: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&trace).unwrap()).unwrap();
        assert_eq!(t["node_count"], 4);
        assert_eq!(t["visits"].as_array().unwrap().len() as u64, r["visits"].as_u64().unwrap());
        assert_eq!(t["best"]["edges"]["value"], 3.0);
    }

    #[rstest]
    fn unknown_objective(mut cmd: Command) {
        cmd.arg(K4)
            .arg("--objective")
            .arg("volume")
            .assert()
            .failure()
            .stderr(contains("unknown objective"));
    }

    #[rstest]
    fn cyclic_dependencies(mut cmd: Command) {
        cmd.arg("tests/data/cyclic.json")
            .assert()
            .failure()
            .stderr(contains("Error scheduling graph state"));
    }
}

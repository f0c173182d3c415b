/// End-to-end tests for the generate-mef3 batch driver
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use san_audit_tools::commands::generate_mef3::{self, GenerateOptions, ReportFormat};

const ACME_DUMP: &str = "\
### CUSTOMER=ACME
### HOST=SW01
### TS=20240115093000
switch:admin>
Account Name: admin
Description: root
Enabled: yes
Locked: no
Role: admin
switch:admin>
";

const GECOS: &str = "\
# identity table
US/K/A123456/IBM/jdoe
US/F/ext001/Vendor/svc_backup
";

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn options(raw: &Path, out: &Path, gecos: &Path) -> GenerateOptions {
    let mut options = GenerateOptions::new(raw, out);
    options.identity_table = gecos.to_path_buf();
    options
}

fn body_lines(path: &Path) -> Vec<String> {
    let contents = fs::read_to_string(path).unwrap();
    let lines: Vec<String> = contents.lines().map(str::to_string).collect();
    lines[..lines.len() - 2].to_vec()
}

#[test]
fn test_single_dump_end_to_end() {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(raw.path(), "sw01.userconfig.txt", ACME_DUMP);

    let opts = options(raw.path(), out.path(), &raw.path().join("missing-gecos.txt"));
    let converted = generate_mef3::run(&opts).unwrap();

    assert_eq!(converted.len(), 1);
    let output = out.path().join("ACME-SAN_SW01_20240115093000.mef3");
    assert_eq!(converted[0].output, output);

    let contents = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ACME|S|SW01|SAN|admin||root|enable||admin|admin");
    assert!(lines[1].starts_with(
        "ACME|S|SW01|SAN|NOTaRealID-Ansible||00/V///2024-01-15-09.30.00:FN=iam_extract.ps1:VER=V2.0.74:CKSUM="
    ));
    assert!(lines[1].ends_with("|||#a:tricode#o:/tmp/iam_extract.mef3"));
    assert!(lines[2].starts_with("#kyndrylonly #g:Ansible ### FINAL_TS="));
    assert!(lines[2].ends_with(
        " PROCNUM=1:PROCSPEED=2295:MEM=17179332608:NETWORK=10000000000 10000000000 10000000000|0|"
    ));
    assert!(!contents.contains("switch:admin"));
}

#[test]
fn test_checksum_covers_body_only() {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(raw.path(), "sw01.userconfig.txt", ACME_DUMP);

    let opts = options(raw.path(), out.path(), &raw.path().join("none"));
    let converted = generate_mef3::run(&opts).unwrap();

    let expected = adler2::adler32_slice(b"ACME|S|SW01|SAN|admin||root|enable||admin|admin\n");
    assert_eq!(converted[0].document.checksum, expected);

    let contents = fs::read_to_string(&converted[0].output).unwrap();
    assert!(contents.contains(&format!(":CKSUM={}|||", expected)));
}

#[test]
fn test_identity_table_enrichment() {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let gecos = write(raw.path(), "gecos.txt", GECOS);
    write(
        raw.path(),
        "fabric/sw02.userconfig.txt",
        "### CUSTOMER=ACME\n### HOST=SW02\n### TS=20240201000000\n\
         Account Name: A123456*\nDescription: Jane\nEnabled: yes\nLocked: no\nRole: admin\n\n\
         Account Name: backup\nDescription:  svc_backup \nEnabled: yes\nLocked: yes\nRole: operator\n\n\
         Account Name: field\nDescription: Field   Engineer\nEnabled: no\nRole: user\n",
    );

    generate_mef3::run(&options(raw.path(), out.path(), &gecos)).unwrap();

    let lines = body_lines(&out.path().join("ACME-SAN_SW02_20240201000000.mef3"));
    assert_eq!(
        lines,
        vec![
            "ACME|S|SW02|SAN|A123456*||US/K/A123456/IBM/jdoe|enable||admin|admin",
            "ACME|S|SW02|SAN|backup||US/F/ext001/Vendor/svc_backup|disable||operator|operator",
            "ACME|S|SW02|SAN|field||Field Engineer|disable||user|user",
        ]
    );
}

#[test]
fn test_missing_header_falls_back_to_file_stem() {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(
        raw.path(),
        "core-7.userconfig.txt",
        "### CUSTOMER=ACME\nAccount Name: admin\nEnabled: yes\n",
    );

    let converted =
        generate_mef3::run(&options(raw.path(), out.path(), &raw.path().join("none"))).unwrap();

    let name = converted[0].document.file_name();
    assert!(name.starts_with("ACME-SAN_core-7.userconfig_"));
    assert!(name.ends_with(".mef3"));
    let ts = &converted[0].document.header.timestamp;
    assert_eq!(ts.len(), 14);
    assert!(ts.bytes().all(|b| b.is_ascii_digit()));
}

#[test]
fn test_no_input_files_is_fatal() {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(raw.path(), "notes.txt", "nothing here");

    let err = generate_mef3::run(&options(raw.path(), out.path(), &raw.path().join("none")))
        .unwrap_err();
    assert!(err.to_string().contains("No raw files found under"));
}

#[test]
fn test_multiple_files_sorted_and_overwritten() {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(raw.path(), "b.userconfig.txt", &ACME_DUMP.replace("SW01", "SW0B"));
    write(raw.path(), "a.userconfig.txt", &ACME_DUMP.replace("SW01", "SW0A"));
    let stale = write(out.path(), "ACME-SAN_SW0A_20240115093000.mef3", "stale\n");

    let opts = options(raw.path(), out.path(), &raw.path().join("none"));
    let converted = generate_mef3::run(&opts).unwrap();

    let names: Vec<String> = converted.iter().map(|c| c.document.file_name()).collect();
    assert_eq!(
        names,
        vec![
            "ACME-SAN_SW0A_20240115093000.mef3",
            "ACME-SAN_SW0B_20240115093000.mef3",
        ]
    );
    assert!(!fs::read_to_string(stale).unwrap().contains("stale"));
}

#[test]
fn test_parallel_matches_sequential() {
    let raw = TempDir::new().unwrap();
    let gecos = write(raw.path(), "gecos.txt", GECOS);
    for i in 0..6 {
        write(
            raw.path(),
            &format!("sw{:02}.userconfig.txt", i),
            &format!(
                "### CUSTOMER=ACME\n### HOST=SW{:02}\n### TS=20240115093000\n\
                 Account Name: a123456\nEnabled: yes\n\nAccount Name: user{}\nDescription: d {}\n",
                i, i, i
            ),
        );
    }

    let seq_out = TempDir::new().unwrap();
    let par_out = TempDir::new().unwrap();
    let sequential = generate_mef3::run(&options(raw.path(), seq_out.path(), &gecos)).unwrap();
    let mut par_opts = options(raw.path(), par_out.path(), &gecos);
    par_opts.parallel = true;
    let parallel = generate_mef3::run(&par_opts).unwrap();

    assert_eq!(sequential.len(), parallel.len());
    for (s, p) in sequential.iter().zip(&parallel) {
        assert_eq!(s.document.file_name(), p.document.file_name());
        assert_eq!(s.document.body, p.document.body);
        assert_eq!(s.document.checksum, p.document.checksum);
        assert_eq!(s.document.trailer[0], p.document.trailer[0]);
    }
}

#[test]
fn test_failure_aborts_batch_by_default() {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(raw.path(), "a.userconfig.txt.gz", "this is not gzip data");
    write(raw.path(), "b.userconfig.txt", ACME_DUMP);

    let err = generate_mef3::run(&options(raw.path(), out.path(), &raw.path().join("none")))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to convert"));
    assert!(!out.path().join("ACME-SAN_SW01_20240115093000.mef3").exists());
}

#[test]
fn test_parallel_abort_skips_later_files() {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(raw.path(), "a.userconfig.txt.gz", "this is not gzip data");
    for i in 0..8 {
        write(
            raw.path(),
            &format!("b{}.userconfig.txt", i),
            &ACME_DUMP.replace("SW01", &format!("SW1{}", i)),
        );
    }

    let mut opts = options(raw.path(), out.path(), &raw.path().join("none"));
    opts.parallel = true;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap();
    let err = pool.install(|| generate_mef3::run(&opts)).unwrap_err();

    assert!(err.to_string().contains("Failed to convert"));
    let written = fs::read_dir(out.path()).unwrap().count();
    assert_eq!(written, 0);
}

#[test]
fn test_continue_on_error_converts_remaining_files() {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(raw.path(), "a.userconfig.txt.gz", "this is not gzip data");
    write(raw.path(), "b.userconfig.txt", ACME_DUMP);

    let mut opts = options(raw.path(), out.path(), &raw.path().join("none"));
    opts.continue_on_error = true;
    let err = generate_mef3::run(&opts).unwrap_err();

    assert_eq!(err.to_string(), "1 of 2 file(s) failed to convert");
    assert!(out.path().join("ACME-SAN_SW01_20240115093000.mef3").exists());
}

#[test]
fn test_csv_report() {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let gecos = write(raw.path(), "gecos.txt", GECOS);
    write(
        raw.path(),
        "sw01.userconfig.txt",
        &format!("{}\nAccount Name: jdoe\nEnabled: yes\n", ACME_DUMP),
    );

    let report = out.path().join("accounts.csv");
    let mut opts = options(raw.path(), out.path(), &gecos);
    opts.report = Some(report.clone());
    generate_mef3::run(&opts).unwrap();

    let mut reader = csv::Reader::from_path(&report).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "source_file",
            "output_file",
            "customer",
            "asset_id",
            "username",
            "status",
            "identity",
            "resolution"
        ]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][4], "admin");
    assert_eq!(&rows[0][7], "description");
    assert_eq!(&rows[1][4], "jdoe");
    assert_eq!(&rows[1][5], "enable");
    assert_eq!(&rows[1][6], "US/K/A123456/IBM/jdoe");
    assert_eq!(&rows[1][7], "tail-username");
}

#[test]
fn test_json_report_format_override() {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(raw.path(), "sw01.userconfig.txt", ACME_DUMP);

    let report = out.path().join("accounts.out");
    let mut opts = options(raw.path(), out.path(), &raw.path().join("none"));
    opts.report = Some(report.clone());
    opts.report_format = Some(ReportFormat::Json);
    generate_mef3::run(&opts).unwrap();

    let rows: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(rows[0]["output_file"], "ACME-SAN_SW01_20240115093000.mef3");
    assert_eq!(rows[0]["identity"], "root");
    assert_eq!(rows[0]["status"], "enable");
}

use san_audit_tools::identity::{resolve, IdentityIndex, ResolutionSource};
use san_audit_tools::userconfig::account::{AccountRecord, AccountStatus};
use san_audit_tools::userconfig::parse_userconfig;

fn account(username: &str, description: &str) -> AccountRecord {
    AccountRecord {
        username: username.to_string(),
        description: description.to_string(),
        status: AccountStatus::Enabled,
        role: "user".to_string(),
    }
}

#[test]
fn test_account_id_returns_exact_raw_line() {
    let lines = [
        "US/K/A123456/IBM/jdoe",
        "GB/K/zz9/Partner Org/Sam Smith/extra",
        "IN/k/MiXeD/IBM/Ravi",
    ];
    let index = IdentityIndex::from_table(&lines.join("\n"));

    for (username, expected) in [
        ("a123456", lines[0]),
        ("A123456*", lines[0]),
        ("ZZ9", lines[1]),
        ("mixed**", lines[2]),
    ] {
        let res = resolve(&account(username, "ignored"), &index);
        assert_eq!(res.identity, expected, "username {}", username);
        assert_eq!(res.source, ResolutionSource::AccountId);
    }
}

#[test]
fn test_unmatched_accounts_use_collapsed_description() {
    let index = IdentityIndex::from_table("US/K/A123456/IBM/jdoe\n");

    for (description, expected) in [
        ("root", "root"),
        ("  Storage   Admin  ", "Storage Admin"),
        ("line\tbreak\u{a0}kept", "line break kept"),
        ("", ""),
        ("us/k/lower/case/line", "us/k/lower/case/line"),
    ] {
        let res = resolve(&account("nobody", description), &index);
        assert_eq!(res.identity, expected);
        assert_eq!(res.source, ResolutionSource::Description);
    }
}

#[test]
fn test_parsed_dump_resolves_in_block_order() {
    let index = IdentityIndex::from_table("US/F/v1/Vendor/Night Ops\n");
    let accounts = parse_userconfig(
        "Account Name: ops\nDescription: night ops\nEnabled: yes\n\n\
         Account Name: svc\nDescription: US/K/B2/IBM/Svc Owner\nEnabled: yes\n",
    );

    let resolved: Vec<(String, ResolutionSource)> = accounts
        .iter()
        .map(|a| {
            let res = resolve(a, &index);
            (res.identity, res.source)
        })
        .collect();

    assert_eq!(
        resolved,
        vec![
            (
                "US/F/v1/Vendor/Night Ops".to_string(),
                ResolutionSource::TailDescription
            ),
            (
                "US/K/B2/IBM/Svc Owner".to_string(),
                ResolutionSource::Preformed
            ),
        ]
    );
}

use crate::family::{ConnectionType, FamilyConnection, FamilyMember, FamilyTree, Gender};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Parses a dataset document: `rootMemberId` + `members` map, with member
/// fields in the camelCase shape of the original data files.
pub fn parse_tree(input: &str) -> Result<FamilyTree> {
    let tree: FamilyTree =
        serde_json::from_str(input).context("failed to parse family dataset JSON")?;
    Ok(tree)
}

pub fn load_tree(path: &Path) -> Result<FamilyTree> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file {}", path.display()))?;
    parse_tree(&contents)
}

fn member(id: &str, name: &str, gender: Gender, is_bloodline: bool) -> FamilyMember {
    FamilyMember {
        id: id.to_string(),
        name: name.to_string(),
        gender,
        birth_date: None,
        death_date: None,
        spouse_ids: Vec::new(),
        parent_ids: Vec::new(),
        children: Vec::new(),
        notes: None,
        photo: None,
        is_bloodline,
    }
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// The built-in three-generation sample family used when no dataset is given.
pub fn sample_tree() -> FamilyTree {
    let mut members = BTreeMap::new();

    // First generation (grandparents)
    let mut necdet = member("necdet", "NECDET", Gender::Male, true);
    necdet.spouse_ids = ids(&["guloren"]);
    necdet.children = ids(&["kemal"]);
    members.insert(necdet.id.clone(), necdet);

    let mut guloren = member("guloren", "GÜLÖREN", Gender::Female, false);
    guloren.spouse_ids = ids(&["necdet"]);
    guloren.children = ids(&["kemal"]);
    members.insert(guloren.id.clone(), guloren);

    // Second generation (parents)
    let mut kemal = member("kemal", "KEMAL", Gender::Male, true);
    kemal.parent_ids = ids(&["necdet", "guloren"]);
    kemal.spouse_ids = ids(&["gaye"]);
    kemal.children = ids(&["naz", "asutay", "bogealp", "barbaros"]);
    members.insert(kemal.id.clone(), kemal);

    let mut gaye = member("gaye", "GAYE", Gender::Female, false);
    gaye.spouse_ids = ids(&["kemal"]);
    gaye.children = ids(&["naz", "asutay", "bogealp", "barbaros"]);
    members.insert(gaye.id.clone(), gaye);

    // Third generation (children)
    let mut naz = member("naz", "NAZ", Gender::Female, true);
    naz.parent_ids = ids(&["kemal", "gaye"]);
    members.insert(naz.id.clone(), naz);

    let mut asutay = member("asutay", "ASUTAY", Gender::Male, true);
    asutay.parent_ids = ids(&["kemal", "gaye"]);
    members.insert(asutay.id.clone(), asutay);

    let mut bogealp = member("bogealp", "BOGEALP", Gender::Male, true);
    bogealp.parent_ids = ids(&["kemal", "gaye"]);
    members.insert(bogealp.id.clone(), bogealp);

    let mut barbaros = member("barbaros", "BARBAROS", Gender::Male, false);
    barbaros.parent_ids = ids(&["kemal", "gaye"]);
    members.insert(barbaros.id.clone(), barbaros);

    FamilyTree {
        root_member_id: "necdet".to_string(),
        members,
        connections: sample_connections(),
    }
}

fn sample_connections() -> Vec<FamilyConnection> {
    let spouse_pairs = [("necdet", "guloren"), ("kemal", "gaye")];
    let bloodline_pairs = [
        ("necdet", "kemal"),
        ("guloren", "kemal"),
        ("kemal", "naz"),
        ("kemal", "asutay"),
        ("kemal", "bogealp"),
        ("kemal", "barbaros"),
        ("gaye", "naz"),
        ("gaye", "asutay"),
        ("gaye", "bogealp"),
        ("gaye", "barbaros"),
    ];

    let mut connections = Vec::new();
    for (from, to) in spouse_pairs {
        connections.push(FamilyConnection {
            from: from.to_string(),
            to: to.to_string(),
            kind: ConnectionType::Spouse,
        });
    }
    for (from, to) in bloodline_pairs {
        connections.push(FamilyConnection {
            from: from.to_string(),
            to: to.to_string(),
            kind: ConnectionType::Bloodline,
        });
    }
    connections
}

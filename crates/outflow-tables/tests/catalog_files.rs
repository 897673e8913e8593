//! File-backed catalog loads: telescope table and star catalog together,
//! the way a run sets itself up.

use outflow_tables::{StarCatalog, TelescopeTable};

const TELESCOPE_DAT: &str = "\
#TELESCOPE SIZE ABS_ERR
APEX 12. 0.2
JCMT 15. 0.3
HIFI 3.5 0.15
";

const STAR_DAT: &str = "\
# Observed targets.
#STAR_NAME STAR_NAME_PLOTS DISTANCE V_LSR
IRC+10216  IRC_+10216      150.     -26.
o_cet      o_Cet           91.7     46.8
";

#[test]
fn load_both_catalogs_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let telescope_file = dir.path().join("Telescope_Data.dat");
    let star_file = dir.path().join("Star.dat");
    std::fs::write(&telescope_file, TELESCOPE_DAT).unwrap();
    std::fs::write(&star_file, STAR_DAT).unwrap();

    let telescopes = TelescopeTable::load(&telescope_file).unwrap();
    assert_eq!(telescopes.len(), 3);
    assert_eq!(telescopes.lookup("APEX").unwrap().dish_size_m, 12.0);

    let stars = StarCatalog::load(&star_file).unwrap();
    assert_eq!(stars.len(), 2);
    assert_eq!(stars.float_field("o_cet", "DISTANCE").unwrap(), 91.7);
    assert_eq!(stars.display_name("IRC+10216").unwrap(), "IRC +10216");
}

#[test]
fn missing_catalog_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TelescopeTable::load(&dir.path().join("absent.dat")).unwrap_err();
    assert_eq!(err.code(), 60);
}

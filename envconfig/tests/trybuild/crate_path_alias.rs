//! Trybuild fixture verifying `#[env(crate = "...")]` with a `use ... as`
//! rename.

use envconfig as my_cfg;
use my_cfg::{EnvConfig, SourceMap};

#[derive(Debug, Default, EnvConfig)]
#[env(crate = "my_cfg")]
struct AliasedConfig {
    #[env(key = "VALUE", default = "hello")]
    value: String,
    #[env(key = "COUNT")]
    count: u32,
}

fn main() {
    let map: SourceMap = [("COUNT", "2")].into_iter().collect();
    let mut config = AliasedConfig::default();
    let result: my_cfg::EnvConfigResult<()> = my_cfg::populate(&mut config, &map, "");
    assert!(result.is_ok());
    assert_eq!(config.value, "hello");
    assert_eq!(config.count, 2);
}

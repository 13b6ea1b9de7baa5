//! Catalog of the grammars compiled into this crate.

use pegtree_lib::Grammar;

macro_rules! define_grammars {
    (
        $(
            $fn_name:ident => {
                feature: $feature:literal,
                module: $module:ident,
                names: [$($alias:literal),* $(,)?] $(,)?
            }
        ),* $(,)?
    ) => {
        $(
            #[cfg(feature = $feature)]
            pub fn $fn_name() -> &'static Grammar {
                crate::$module::grammar()
            }
        )*

        /// Look up a grammar by name or alias, case-insensitively.
        pub fn from_name(s: &str) -> Option<&'static Grammar> {
            match s.to_ascii_lowercase().as_str() {
                $(
                    #[cfg(feature = $feature)]
                    $($alias)|* => Some($fn_name()),
                )*
                _ => None,
            }
        }

        /// Every enabled grammar.
        pub fn all() -> Vec<&'static Grammar> {
            vec![
                $(
                    #[cfg(feature = $feature)]
                    $fn_name(),
                )*
            ]
        }
    };
}

define_grammars! {
    arithmetic => {
        feature: "grammar-arithmetic",
        module: arithmetic,
        names: ["arithmetic", "arith", "expr", "expression"],
    },
    json => {
        feature: "grammar-json",
        module: json,
        names: ["json"],
    },
}

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use syn::punctuated::Punctuated;
use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for another crate as seen from the
/// caller's Cargo.toml.
///
/// This helper is intended for proc-macro code
/// generation where the emitted path must be valid from the invoking crate.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_schema"));
/// ```
///
/// The cost of this operation is not low, and the caller should store the
/// result and call it only once per proc-macro invocation.
///
/// # Resolution rules
///
/// 1. If the caller is the requested crate itself, return `::crate_name`.
/// 2. If the requested crate is listed in `dependencies`, return
///    `::crate_name`, or `::renamed` when it is imported under another key
///    with `package = "crate_name"`.
/// 3. If the requested crate name begins with `vc_` and the caller depends
///    on the facade crate `vc_form`, return `::vc_form::short_name`
///    (e.g. `vc_schema` -> `::vc_form::schema`).
/// 4. Repeat step 2-3 in `dev-dependencies`.
/// 5. Otherwise, fall back to the absolute path `::crate_name`.
///
/// ## Note
///
/// When a crate needs to reference itself, library code should use
/// `crate::...`, while doctests and other external code typically use the
/// absolute path `::crate_name`.
///
/// To support both cases adding an alias such as
/// `extern crate self as vc_schema;` in the crate root can resolve the conflict.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Option<Document<Box<str>>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "vc_form";
const CRATE_PREFIX: &str = "vc_";

impl Manifest {
    /// Parses a manifest from its text, e.g. for tests.
    pub fn parse(text: &str) -> Option<Self> {
        let manifest = Document::parse(Box::from(text)).ok()?;
        Some(Self {
            manifest: Some(manifest),
            modified_time: SystemTime::UNIX_EPOCH,
        })
    }

    // Try get `Cargo.toml` path.
    #[inline(never)]
    fn get_manifest_path() -> Option<PathBuf> {
        env::var_os("CARGO_MANIFEST_DIR").map(|path| {
            let mut path = PathBuf::from(path);
            path.push("Cargo.toml");
            path
        })
    }

    // Try get `Cargo.toml` modified time.
    #[inline(never)]
    fn get_manifest_modified_time(
        cargo_manifest_path: &Path,
    ) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(cargo_manifest_path).and_then(|metadata| metadata.modified())
    }

    // An unreadable manifest resolves every crate to its absolute path.
    #[inline(never)]
    fn read_manifest(path: &Path) -> Option<Document<Box<str>>> {
        let manifest = std::fs::read_to_string(path).ok()?.into_boxed_str();
        Document::parse(manifest).ok()
    }

    /// Builds `::a::b::...` from identifier segments.
    fn absolute_path(segments: &[&str]) -> syn::Path {
        let mut path = syn::Path {
            leading_colon: Some(Default::default()),
            segments: Punctuated::new(),
        };
        for segment in segments {
            let ident = syn::Ident::new(&segment.replace('-', "_"), Span::call_site());
            path.segments.push(syn::PathSegment::from(ident));
        }
        path
    }

    /// The key under which the package `name` is imported, if any.
    fn dependency_key<'a>(deps: &'a Table, name: &'a str) -> Option<&'a str> {
        if deps.contains_key(name) {
            return Some(name);
        }
        deps.iter().find_map(|(key, item)| {
            let package = item.get("package")?.as_str()?;
            (package == name).then_some(key)
        })
    }

    #[inline]
    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if let Some(key) = Self::dependency_key(deps, name) {
            return Some(Self::absolute_path(&[key]));
        }

        let module = name.strip_prefix(CRATE_PREFIX)?;
        let facade = Self::dependency_key(deps, FACADE_NAME)?;
        Some(Self::absolute_path(&[facade, module]))
    }

    fn package_name(&self) -> Option<&str> {
        self.manifest.as_ref()?.get("package")?.get("name")?.as_str()
    }

    fn table(&self, key: &str) -> Option<&Table> {
        match self.manifest.as_ref()?.get(key)? {
            Item::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the top-level documentation for the resolution
    /// order and examples.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        if self.package_name() == Some(name) {
            return Self::absolute_path(&[name]);
        }

        for section in ["dependencies", "dev-dependencies"] {
            if let Some(deps) = self.table(section)
                && let Some(val) = Self::find_in_deps(deps, name)
            {
                return val;
            }
        }

        Self::absolute_path(&[name])
    }

    /// Obtain the [Manifest] of the caller's Cargo.toml.
    ///
    /// This function reads and caches the caller's `Cargo.toml`. Parsing the
    /// manifest and acquiring the global cache lock are relatively expensive for
    /// proc-macros, so callers should invoke [`Manifest::shared`] sparingly (typically
    /// once per macro invocation) and cache the returned [`syn::Path`] where possible.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(manifest_path) = Self::get_manifest_path() else {
            return func(&Manifest {
                manifest: None,
                modified_time: SystemTime::UNIX_EPOCH,
            });
        };
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

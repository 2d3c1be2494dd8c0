//! The registration table of packages and modules.
//!
//! Rust has no runtime import system, so packages and their modules make
//! themselves known up front. A package registers its name, its source
//! directory and a [`PackageHost`]; a module registers its dotted name and a
//! collector function that builds its test tree.
//!
//! Registration happens either statically, with the [`package!`](crate::package)
//! and [`module!`](crate::module) macros that place entries into the
//! [`PACKAGES`] and [`MODULES`] distributed slices, or by hand on a
//! [`Registry`].
//!
//! ```ignore
//! testpkg::package!(pkgx, dir = "tests/pkgx", host = &Hooks);
//! testpkg::module!(pkgx.test_a, collect);
//!
//! fn collect(tests: &mut testpkg::suite::Collector) {
//!     tests.group("T", |t| {
//!         t.test("test_one", || assert_eq!(1 + 1, 2));
//!     });
//! }
//! ```

use std::{
    collections::BTreeMap,
    fmt::{self, Debug},
    path::{Path, PathBuf},
};

use crate::{
    Error, Result,
    package::{NoHost, PackageHost},
    suite::{Collector, TestSuite},
};

/// A statically registered package.
pub struct PackageEntry {
    pub name: &'static str,
    pub dir: &'static str,
    pub host: &'static dyn PackageHost,
}

/// A statically registered module.
pub struct ModuleEntry {
    pub name: &'static str,
    pub collect: fn(&mut Collector),
}

#[linkme::distributed_slice]
pub static PACKAGES: [PackageEntry];

#[linkme::distributed_slice]
pub static MODULES: [ModuleEntry];

/// Register a package with the binary being built.
///
/// `dir` is relative to the manifest directory of the crate invoking the macro.
#[macro_export]
macro_rules! package {
    ($name:ident, dir = $dir:literal $(,)?) => {
        $crate::package!($name, dir = $dir, host = &$crate::NoHost);
    };
    ($name:ident, dir = $dir:literal, host = $host:expr $(,)?) => {
        const _: () = {
            #[$crate::__private::linkme::distributed_slice($crate::registry::PACKAGES)]
            #[linkme(crate = $crate::__private::linkme)]
            static PACKAGE: $crate::registry::PackageEntry = $crate::registry::PackageEntry {
                name: ::std::stringify!($name),
                dir: ::std::concat!(::std::env!("CARGO_MANIFEST_DIR"), "/", $dir),
                host: $host,
            };
        };
    };
}

/// Register a module under its dotted name, e.g. `module!(pkgx.test_a, collect)`.
#[macro_export]
macro_rules! module {
    ($first:ident $(. $rest:ident)*, $collect:path $(,)?) => {
        const _: () = {
            #[$crate::__private::linkme::distributed_slice($crate::registry::MODULES)]
            #[linkme(crate = $crate::__private::linkme)]
            static MODULE: $crate::registry::ModuleEntry = $crate::registry::ModuleEntry {
                name: ::std::concat!(::std::stringify!($first) $(, ".", ::std::stringify!($rest))*),
                collect: $collect,
            };
        };
    };
}

#[derive(Clone)]
struct PackageRecord {
    dir: PathBuf,
    host: &'static dyn PackageHost,
}

/// Explicit table of every known package and module.
#[derive(Clone, Default)]
pub struct Registry {
    packages: BTreeMap<String, PackageRecord>,
    modules: BTreeMap<String, fn(&mut Collector)>,
}

impl Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("packages", &self.packages.keys().collect::<Vec<_>>())
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from everything registered with [`package!`](crate::package)
    /// and [`module!`](crate::module) in the current binary.
    pub fn linked() -> Result<Self> {
        let mut registry = Self::new();
        for entry in PACKAGES.iter() {
            registry.add_package(entry.name, entry.dir, entry.host)?;
        }
        for entry in MODULES.iter() {
            registry.add_module(entry.name, entry.collect)?;
        }
        tracing::debug!(
            packages = registry.packages.len(),
            modules = registry.modules.len(),
            "collected linked registrations"
        );
        Ok(registry)
    }

    fn ensure_vacant(&self, name: &str) -> Result<()> {
        match self.packages.contains_key(name) || self.modules.contains_key(name) {
            true => Err(Error::DuplicateRegistration(name.to_string())),
            false => Ok(()),
        }
    }

    pub fn add_package(
        &mut self,
        name: impl Into<String>,
        dir: impl Into<PathBuf>,
        host: &'static dyn PackageHost,
    ) -> Result<&mut Self> {
        let name = name.into();
        self.ensure_vacant(&name)?;
        let dir = dir.into();
        self.packages.insert(name, PackageRecord { dir, host });
        Ok(self)
    }

    pub fn add_module(
        &mut self,
        name: impl Into<String>,
        collect: fn(&mut Collector),
    ) -> Result<&mut Self> {
        let name = name.into();
        self.ensure_vacant(&name)?;
        self.modules.insert(name, collect);
        Ok(self)
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Look up a package or module by its dotted name.
    pub fn resolve(&self, name: &str) -> Result<Namespace> {
        if let Some(record) = self.packages.get(name) {
            return Ok(Namespace {
                name: name.to_string(),
                package: name.to_string(),
                dir: Some(record.dir.clone()),
                host: record.host,
            });
        }

        if self.modules.contains_key(name) {
            let package = name.rsplit_once('.').map(|(parent, _)| parent).unwrap_or("");
            return Ok(Namespace {
                name: name.to_string(),
                package: package.to_string(),
                dir: None,
                host: &NoHost,
            });
        }

        Err(Error::NotFound(name.to_string()))
    }

    /// Import a registered module, making its collector available.
    pub fn import(&self, name: &str) -> Result<Module> {
        let collect = *self
            .modules
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        tracing::debug!(module = name, "imported module");
        Ok(Module {
            name: name.to_string(),
            collect,
        })
    }
}

/// A resolved package or module.
///
/// A namespace is a package when its name equals the package it declares.
/// Modules declare their parent, so `pkgx.test_a` declares `pkgx`.
#[derive(Clone)]
pub struct Namespace {
    name: String,
    package: String,
    dir: Option<PathBuf>,
    host: &'static dyn PackageHost,
}

impl Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.name)
            .field("package", &self.package)
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

impl Namespace {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn host(&self) -> &'static dyn PackageHost {
        self.host
    }

    pub fn is_package(&self) -> bool {
        self.name == self.package
    }
}

/// An imported module.
#[derive(Clone)]
pub struct Module {
    name: String,
    collect: fn(&mut Collector),
}

impl Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Module {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the module's collector and return the test tree it produced.
    pub fn load_tests(&self) -> TestSuite {
        let mut collector = Collector::new(self.name.as_str());
        (self.collect)(&mut collector);
        collector.into_suite()
    }
}

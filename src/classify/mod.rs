//! Classification and grouping of scanned modules
//!
//! Reconciles adapter output with the manifest index and splits modules into
//! three buckets:
//! - Direct: declared in the manifest as a main dependency
//! - Indirect: declared but secondary (dev-only, or `// indirect` in go.mod)
//! - Transitive: not declared at all
//!
//! `classify` is a pure function returning fresh containers; ordering inside
//! a bucket is the adapter's order unless `sort_grouped` is applied.

mod version_delta;

pub use version_delta::VersionDelta;

use crate::domain::{DependencyIndex, Module};
use crate::filter::ModuleFilter;

/// Dependency types that place a direct module in the Indirect bucket
const SECONDARY_TYPES: &[&str] = &["devDependencies", "dev", "indirect"];

/// Classification bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Direct,
    Indirect,
    Transitive,
}

/// Modules split by section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    pub direct: Vec<Module>,
    pub indirect: Vec<Module>,
    pub transitive: Vec<Module>,
}

/// Apply the manifest index to one module, returning the reconciled copy
///
/// When the index knows the name its `direct` and type win and the module is
/// marked as coming from the manifest; otherwise the adapter's view is kept.
pub fn reconcile(module: &Module, index: &DependencyIndex) -> Module {
    let mut out = module.clone();
    match index.get(&module.name) {
        Some(info) => {
            out.direct = info.direct;
            out.dependency_type = info.dep_type.clone();
            out.from_manifest = true;
        }
        None => out.from_manifest = false,
    }
    out
}

/// Bucket for an already reconciled module
pub fn section_of(module: &Module) -> Section {
    if module.direct {
        if SECONDARY_TYPES.contains(&module.dependency_type.as_str()) {
            Section::Indirect
        } else {
            Section::Direct
        }
    } else if module.from_manifest {
        Section::Indirect
    } else {
        Section::Transitive
    }
}

/// Sort key for grouped display: version delta category first, then name
pub fn group_key(module: &Module) -> u8 {
    delta_of(module).group_key()
}

/// Version delta between a module's current and candidate versions
pub fn delta_of(module: &Module) -> VersionDelta {
    match module.update_version() {
        Some(candidate) => VersionDelta::from_versions(&module.version, candidate),
        None => VersionDelta::Unknown,
    }
}

/// Split modules into buckets, dropping any without a candidate update
pub fn classify(modules: &[Module], index: &DependencyIndex) -> Buckets {
    let mut buckets = Buckets::default();
    for module in modules.iter().filter(|m| m.has_update()) {
        let module = reconcile(module, index);
        match section_of(&module) {
            Section::Direct => buckets.direct.push(module),
            Section::Indirect => buckets.indirect.push(module),
            Section::Transitive => buckets.transitive.push(module),
        }
    }
    buckets
}

/// Stable sort by (group key, name)
pub fn sort_grouped(modules: &mut [Module]) {
    modules.sort_by(|a, b| {
        group_key(a)
            .cmp(&group_key(b))
            .then_with(|| a.name.cmp(&b.name))
    });
}

impl Buckets {
    pub fn new(direct: Vec<Module>, indirect: Vec<Module>, transitive: Vec<Module>) -> Self {
        Self {
            direct,
            indirect,
            transitive,
        }
    }

    /// Drop the transitive bucket unless `include_all` is set
    pub fn visible(mut self, include_all: bool) -> Self {
        if !include_all {
            self.transitive.clear();
        }
        self
    }

    /// Apply the name and cooldown filter to every bucket
    pub fn filtered(self, filter: &ModuleFilter) -> Self {
        Self {
            direct: filter.apply(&self.direct),
            indirect: filter.apply(&self.indirect),
            transitive: filter.apply(&self.transitive),
        }
    }

    /// Sort each bucket for grouped display
    pub fn sorted_grouped(mut self) -> Self {
        sort_grouped(&mut self.direct);
        sort_grouped(&mut self.indirect);
        sort_grouped(&mut self.transitive);
        self
    }

    pub fn section(&self, section: Section) -> &[Module] {
        match section {
            Section::Direct => &self.direct,
            Section::Indirect => &self.indirect,
            Section::Transitive => &self.transitive,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Vec<Module> {
        match section {
            Section::Direct => &mut self.direct,
            Section::Indirect => &mut self.indirect,
            Section::Transitive => &mut self.transitive,
        }
    }

    pub fn len(&self) -> usize {
        self.direct.len() + self.indirect.len() + self.transitive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct, then indirect, then transitive
    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.direct
            .iter()
            .chain(self.indirect.iter())
            .chain(self.transitive.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Module> {
        self.direct
            .iter_mut()
            .chain(self.indirect.iter_mut())
            .chain(self.transitive.iter_mut())
    }

    /// Flatten into one list in section order
    pub fn into_vec(self) -> Vec<Module> {
        let mut all = self.direct;
        all.extend(self.indirect);
        all.extend(self.transitive);
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DependencyInfo;

    fn module(name: &str, direct: bool, dep_type: &str) -> Module {
        Module::new(name, "v1.0.0", direct, dep_type).with_update_version("v1.0.1")
    }

    fn names(modules: &[Module]) -> Vec<&str> {
        modules.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_adapter_fallback_rules() {
        let modules = vec![
            module("main", true, "dependencies"),
            module("dev", true, "devDependencies"),
            module("py-dev", true, "dev"),
            module("ind", true, "indirect"),
            module("deep", false, "transitive"),
        ];
        let b = classify(&modules, &DependencyIndex::new());
        assert_eq!(names(&b.direct), vec!["main"]);
        assert_eq!(names(&b.indirect), vec!["dev", "py-dev", "ind"]);
        assert_eq!(names(&b.transitive), vec!["deep"]);
        assert!(b.iter().all(|m| !m.from_manifest));
    }

    #[test]
    fn test_manifest_overrides_adapter() {
        let mut idx = DependencyIndex::new();
        idx.insert("a", DependencyInfo::new(true, "direct"));
        idx.insert("b", DependencyInfo::new(false, "indirect"));
        idx.insert("c", DependencyInfo::new(true, "devDependencies"));

        let modules = vec![
            module("a", false, "transitive"),
            module("b", true, "direct"),
            module("c", true, "dependencies"),
        ];
        let b = classify(&modules, &idx);
        assert_eq!(names(&b.direct), vec!["a"]);
        assert_eq!(names(&b.indirect), vec!["b", "c"]);
        assert!(b.transitive.is_empty());
        assert!(b.iter().all(|m| m.from_manifest));
        assert_eq!(b.indirect[0].dependency_type, "indirect");
    }

    #[test]
    fn test_modules_without_update_are_dropped() {
        let modules = vec![
            Module::new("stale", "1.0.0", true, "dependencies"),
            module("fresh", true, "dependencies"),
        ];
        let b = classify(&modules, &DependencyIndex::new());
        assert_eq!(b.len(), 1);
        assert_eq!(b.direct[0].name, "fresh");
    }

    #[test]
    fn test_classify_is_pure_and_idempotent() {
        let mut idx = DependencyIndex::new();
        idx.insert("x", DependencyInfo::new(false, "indirect"));
        let modules = vec![module("z", true, "dependencies"), module("x", true, "direct")];
        let snapshot = modules.clone();

        let first = classify(&modules, &idx);
        let second = classify(&modules, &idx);
        assert_eq!(first, second);
        assert_eq!(modules, snapshot);

        let again = classify(&first.clone().into_vec(), &idx);
        assert_eq!(again, first);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let modules = vec![
            module("zeta", true, "dependencies"),
            module("alpha", true, "dependencies"),
        ];
        let b = classify(&modules, &DependencyIndex::new());
        assert_eq!(names(&b.direct), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_sort_grouped_total_order() {
        let mut modules = vec![
            Module::new("p2", "1.0.0", true, "main").with_update_version("1.0.1"),
            Module::new("u", "latest", true, "main").with_update_version("next"),
            Module::new("m", "1.0.0", true, "main").with_update_version("2.0.0"),
            Module::new("p1", "1.0.0", true, "main").with_update_version("1.0.5"),
            Module::new("n", "1.0.0", true, "main").with_update_version("1.2.0"),
        ];
        sort_grouped(&mut modules);
        assert_eq!(names(&modules), vec!["m", "n", "p1", "p2", "u"]);

        let mut again = modules.clone();
        again.reverse();
        sort_grouped(&mut again);
        assert_eq!(again, modules);
    }

    #[test]
    fn test_visible_drops_transitive() {
        let modules = vec![module("a", true, "direct"), module("t", false, "transitive")];
        let b = classify(&modules, &DependencyIndex::new());
        assert_eq!(b.clone().visible(false).len(), 1);
        assert_eq!(b.visible(true).len(), 2);
    }

    #[test]
    fn test_into_vec_section_order() {
        let b = Buckets::new(
            vec![module("d", true, "x")],
            vec![module("i", true, "dev")],
            vec![module("t", false, "x")],
        );
        assert_eq!(names(&b.into_vec()), vec!["d", "i", "t"]);
    }
}

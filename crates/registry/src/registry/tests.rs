use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bindery_primitives::{Primitive, TypeHandle, TypeRef};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::catalog::{MemberListing, TypeCatalog, TypeDescriptor};
use crate::{MemberRegistry, StaticCatalog};

/// Wraps a catalog and counts how often each query reaches it.
struct CountingCatalog {
	inner: StaticCatalog,
	described: AtomicUsize,
	listed: AtomicUsize,
}

impl CountingCatalog {
	fn new(inner: StaticCatalog) -> Arc<Self> {
		Arc::new(Self {
			inner,
			described: AtomicUsize::new(0),
			listed: AtomicUsize::new(0),
		})
	}
}

impl TypeCatalog for CountingCatalog {
	fn describe_type(&self, ty: &TypeHandle) -> Option<TypeDescriptor> {
		self.described.fetch_add(1, Ordering::SeqCst);
		self.inner.describe_type(ty)
	}

	fn describe_members(&self, ty: &TypeHandle) -> Option<MemberListing> {
		self.listed.fetch_add(1, Ordering::SeqCst);
		self.inner.describe_members(ty)
	}
}

fn shapes() -> StaticCatalog {
	let mut catalog = StaticCatalog::new();
	catalog
		.define("geo.Shape")
		.constructor(&[])
		.method("area", &[])
		.method("scale", &["double"])
		.field("name", "String")
		.finish();
	catalog
		.define("geo.Circle")
		.extends("geo.Shape")
		.implements("geo.Round")
		.constructor(&["double"])
		.restricted_constructor(&["int"])
		.method("area", &[])
		.method("scale", &["int"])
		.restricted_method("secret", &[])
		.field("radius", "double")
		.finish();
	catalog
		.define("geo.Round")
		.interface()
		.method("diameter", &[])
		.finish();
	catalog
		.define("geo.Color")
		.enumeration()
		.constant("RED")
		.constant("GREEN")
		.method("mix", &["geo.Color"])
		.finish();
	catalog
		.define_nested("geo.Circle", "Arc", false)
		.constructor(&["int"])
		.finish();
	catalog
		.define_nested("geo.Circle", "Builder", true)
		.constructor(&[])
		.finish();
	catalog.define("geo.Hidden").restricted().method("peek", &[]).finish();
	catalog
}

fn registry() -> (Arc<CountingCatalog>, MemberRegistry) {
	let catalog = CountingCatalog::new(shapes());
	let registry = MemberRegistry::new(catalog.clone());
	(catalog, registry)
}

fn signatures(set: &[Arc<crate::Candidate>]) -> Vec<String> {
	set.iter().map(|c| c.to_string()).collect()
}

#[test]
fn register_type_is_idempotent() {
	let (catalog, registry) = registry();
	let circle = TypeHandle::new("geo.Circle");

	assert!(registry.register_type(&circle));
	let first = registry.descriptor(&circle);
	assert!(registry.register_type(&circle));

	assert_eq!(registry.descriptor(&circle), first);
	assert_eq!(registry.len(), 1);
	assert_eq!(registry.full_name_of("Circle"), Some(circle));
	assert!(registry.collisions().is_empty());
	assert_eq!(catalog.described.load(Ordering::SeqCst), 1);
}

#[test]
fn unknown_types_register_nothing_and_are_asked_once() {
	let (catalog, registry) = registry();
	let ghost = TypeHandle::new("geo.Ghost");

	assert!(!registry.register_type(&ghost));
	assert!(!registry.ensure_loaded(&ghost));
	assert!(registry.lookup_methods(&ghost, "area").is_empty());
	assert!(registry.lookup_constructors(&ghost).is_empty());
	assert_eq!(catalog.described.load(Ordering::SeqCst), 1);
	assert!(registry.is_empty());
}

#[test]
fn registration_does_not_load_members() {
	let (catalog, registry) = registry();
	let circle = TypeHandle::new("geo.Circle");

	registry.register_type(&circle);
	assert!(registry.is_registered(&circle));
	assert!(!registry.is_loaded(&circle));
	assert_eq!(catalog.listed.load(Ordering::SeqCst), 0);

	assert!(registry.ensure_loaded(&circle));
	assert!(registry.is_loaded(&circle));
	let listed = catalog.listed.load(Ordering::SeqCst);
	assert!(registry.ensure_loaded(&circle));
	assert_eq!(catalog.listed.load(Ordering::SeqCst), listed);
}

#[test]
fn methods_walk_the_inheritance_chain_most_derived_first() {
	let (_, registry) = registry();
	let circle = TypeHandle::new("geo.Circle");

	assert_eq!(
		signatures(&registry.lookup_methods(&circle, "scale")),
		vec!["geo.Circle.scale(int)", "geo.Shape.scale(double)"]
	);
	// Overridden signatures are listed once, from the most derived level.
	assert_eq!(
		signatures(&registry.lookup_methods(&circle, "area")),
		vec!["geo.Circle.area()"]
	);
	assert_eq!(
		signatures(&registry.lookup_methods(&circle, "diameter")),
		vec!["geo.Round.diameter()"]
	);
}

#[test]
fn only_public_members_are_collected() {
	let (_, registry) = registry();
	let circle = TypeHandle::new("geo.Circle");

	assert!(!registry.has_method(&circle, "secret"));
	let ctors = registry.lookup_constructors(&circle);
	assert_eq!(ctors.len(), 1);
	assert_eq!(ctors[0].params(), &[TypeRef::Raw(Primitive::Double)]);

	let hidden = TypeHandle::new("geo.Hidden");
	assert!(registry.ensure_loaded(&hidden));
	assert!(!registry.has_method(&hidden, "peek"));
}

#[test]
fn constructors_are_not_inherited() {
	let (_, registry) = registry();
	let circle = TypeHandle::new("geo.Circle");
	assert!(
		registry
			.lookup_constructors(&circle)
			.iter()
			.all(|c| c.owner() == &circle)
	);
}

#[test]
fn fields_include_inherited_ones() {
	let (_, registry) = registry();
	let circle = TypeHandle::new("geo.Circle");

	let name = registry.lookup_field(&circle, "name").expect("inherited field");
	assert_eq!(name.owner, TypeHandle::new("geo.Shape"));
	assert!(registry.lookup_field(&circle, "radius").is_some());
	assert!(registry.lookup_field(&circle, "missing").is_none());
}

#[test]
fn enums_expose_constants_as_fields_and_have_no_constructors() {
	let (_, registry) = registry();
	let color = TypeHandle::new("geo.Color");

	registry.register_type(&color);
	assert!(registry.lookup_constructors(&color).is_empty());
	let red = registry.lookup_field(&color, "RED").expect("constant");
	assert!(red.is_enum_constant());
	assert!(red.is_static());
	assert!(!registry.has_method(&color, "RED"));
	assert!(registry.has_method(&color, "mix"));
}

#[test]
fn nested_index_reports_binding_requirements() {
	let (_, registry) = registry();
	let circle = TypeHandle::new("geo.Circle");

	let arc = registry.nested_type_of(&circle, "Arc").expect("nested");
	assert!(arc.requires_enclosing);
	assert_eq!(arc.handle, TypeHandle::new("geo.Circle$Arc"));
	let builder = registry.nested_type_of(&circle, "Builder").expect("nested");
	assert!(!builder.requires_enclosing);
	assert!(registry.nested_type_of(&circle, "Square").is_none());

	// Instance-bound constructors take the enclosing instance first.
	let ctors = registry.lookup_constructors(&arc.handle);
	assert_eq!(
		ctors[0].params(),
		&[TypeRef::parse("geo.Circle"), TypeRef::Raw(Primitive::Int)]
	);
}

#[test]
fn subtyping_follows_superclasses_and_interfaces() {
	let (_, registry) = registry();
	let circle = TypeHandle::new("geo.Circle");

	assert!(registry.is_subtype(&circle, &circle));
	assert!(registry.is_subtype(&circle, &TypeHandle::new("geo.Shape")));
	assert!(registry.is_subtype(&circle, &TypeHandle::new("geo.Round")));
	assert!(!registry.is_subtype(&TypeHandle::new("geo.Shape"), &circle));
	assert!(!registry.is_subtype(&TypeHandle::new("Integer"), &circle));
}

#[test]
fn simple_name_collisions_are_last_write_wins() {
	let mut catalog = StaticCatalog::new();
	catalog.define("a.Node").finish();
	catalog.define("b.Node").finish();
	let registry = MemberRegistry::new(Arc::new(catalog));
	let a = TypeHandle::new("a.Node");
	let b = TypeHandle::new("b.Node");

	registry.register_type(&a);
	assert_eq!(registry.full_name_of("Node"), Some(a.clone()));
	registry.register_type(&b);
	assert_eq!(registry.full_name_of("Node"), Some(b.clone()));

	let collisions = registry.collisions();
	assert_eq!(collisions.len(), 1);
	assert_eq!(collisions[0].replaced, a);
	assert_eq!(collisions[0].winner, b);
}

#[test]
fn concurrent_first_loads_populate_once() {
	let (catalog, registry) = registry();
	let circle = TypeHandle::new("geo.Circle");

	std::thread::scope(|scope| {
		for _ in 0..8 {
			scope.spawn(|| {
				registry.register_type(&circle);
				assert_eq!(registry.lookup_methods(&circle, "scale").len(), 2);
			});
		}
	});

	// Circle, Shape and Round are each described and listed exactly once.
	assert_eq!(catalog.described.load(Ordering::SeqCst), 3);
	assert_eq!(catalog.listed.load(Ordering::SeqCst), 3);
}

proptest! {
	#[test]
	fn repeated_registration_matches_single_registration(times in 1usize..16) {
		let (catalog, registry) = registry();
		let shape = TypeHandle::new("geo.Shape");
		for _ in 0..times {
			prop_assert!(registry.register_type(&shape));
		}
		prop_assert_eq!(registry.len(), 1);
		prop_assert_eq!(registry.full_name_of("Shape"), Some(shape.clone()));
		prop_assert_eq!(catalog.described.load(Ordering::SeqCst), 1);
		prop_assert!(registry.collisions().is_empty());
	}
}

#![allow(dead_code)]

use std::sync::Arc;

use bindery::{
	Binder, BinderConfig, Candidate, Field, Host, HostError, ObjectRef, StaticCatalog, TypeHandle,
	TypeRef, Value,
};
use parking_lot::Mutex;

pub const TESTER: &str = "app.Tester";

/// One host operation as observed by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
	pub op: &'static str,
	/// `Owner.member(params)` of the dispatched member.
	pub member: String,
	pub receiver: Option<Value>,
	pub args: Vec<Value>,
}

/// Host that records every operation and answers with predictable values.
///
/// Methods return their own signature as a string. Constructors return an
/// instance of the owner type whose payload is the argument list. Methods
/// named `fail`, and the `InnerNoInt(int)` constructor, raise.
#[derive(Debug, Default)]
pub struct RecordingHost {
	calls: Mutex<Vec<Recorded>>,
}

impl RecordingHost {
	pub fn calls(&self) -> Vec<Recorded> {
		self.calls.lock().clone()
	}

	pub fn last(&self) -> Recorded {
		self.calls.lock().last().cloned().expect("no host call recorded")
	}

	fn record(&self, op: &'static str, member: String, receiver: Option<&Value>, args: &[Value]) {
		self.calls.lock().push(Recorded {
			op,
			member,
			receiver: receiver.cloned(),
			args: args.to_vec(),
		});
	}
}

impl Host for RecordingHost {
	fn invoke(&self, receiver: Option<&Value>, method: &Candidate, args: Vec<Value>) -> Result<Value, HostError> {
		self.record("invoke", method.to_string(), receiver, &args);
		if method.name() == "fail" {
			return Err(HostError::Raised("boom".to_string()));
		}
		Ok(Value::from(method.signature()))
	}

	fn construct(&self, constructor: &Candidate, args: Vec<Value>) -> Result<Value, HostError> {
		self.record("construct", constructor.to_string(), None, &args);
		if constructor.owner().simple_name() == "InnerNoInt"
			&& constructor.params().get(1) == Some(&TypeRef::parse("int"))
		{
			return Err(HostError::Raised("InnerNoInt rejects int".to_string()));
		}
		Ok(Value::Object(ObjectRef::new(constructor.owner().clone(), args)))
	}

	fn read_field(&self, receiver: Option<&Value>, field: &Field) -> Result<Value, HostError> {
		self.record("read", field.to_string(), receiver, &[]);
		Ok(Value::from(field.to_string()))
	}

	fn write_field(&self, receiver: Option<&Value>, field: &Field, value: Value) -> Result<(), HostError> {
		self.record("write", field.to_string(), receiver, &[value]);
		Ok(())
	}

	fn enum_constant(&self, ty: &TypeHandle, name: &str) -> Result<Value, HostError> {
		self.record("constant", format!("{ty}.{name}"), None, &[]);
		Ok(Value::Object(ObjectRef::new(ty.clone(), name.to_string())))
	}

	fn sequence_elements(&self, sequence: &ObjectRef) -> Result<Vec<Value>, HostError> {
		sequence
			.downcast_ref::<Vec<Value>>()
			.cloned()
			.ok_or_else(|| HostError::Raised(format!("{} is not a sequence", sequence.type_handle())))
	}
}

pub fn catalog() -> StaticCatalog {
	let mut catalog = StaticCatalog::new();
	catalog
		.define(TESTER)
		.constructor(&[])
		.static_method("methodOverload", &["Object"])
		.static_method("methodOverload", &["byte"])
		.static_method("methodOverload", &["Short"])
		.static_method("methodOverload", &["char"])
		.static_method("methodOverload", &["Integer"])
		.static_method("methodOverload", &["long"])
		.static_method("methodOverload", &["Float"])
		.static_method("methodOverload", &["double"])
		.static_method("methodOverload", &["Object[]"])
		.static_method("twoArgTest", &["int", "int"])
		.static_method("twoArgTest", &["float", "float"])
		.static_method("trueIfInt", &["Object"])
		.static_method("trueIfInt", &["int"])
		.method("describe", &[])
		.method("fail", &[])
		.static_field("id", "int")
		.field("label", "String")
		.finish();
	catalog
		.define_nested(TESTER, "StaticInner", true)
		.constructor(&[])
		.static_method("callMe", &[])
		.static_field("id", "int")
		.finish();
	catalog
		.define_nested(TESTER, "InnerNoInt", false)
		.constructor(&["int"])
		.constructor(&["float"])
		.finish();
	catalog
		.define("app.Counter")
		.constructor(&[])
		.constructor(&["int"])
		.method("add", &["int"])
		.static_method("zero", &[])
		.finish();
	catalog
		.define("app.Color")
		.enumeration()
		.constant("RED")
		.constant("GREEN")
		.finish();
	catalog.define("List").interface().finish();
	catalog
		.define("java.util.ArrayList")
		.implements("List")
		.constructor(&["int", "int"])
		.finish();
	catalog
		.define("app.io.Sink")
		.static_method("take", &["List"])
		.static_method("arr", &["Object[]"])
		.finish();
	catalog.define("app.shapes.Shape").finish();
	catalog
		.define("app.shapes.Circle")
		.extends("app.shapes.Shape")
		.constructor(&[])
		.finish();
	catalog
		.define("app.shapes.Canvas")
		.static_method("draw", &["Object"])
		.static_method("draw", &["app.shapes.Shape"])
		.finish();
	catalog
}

pub fn binder_with(config: BinderConfig) -> (Binder, Arc<RecordingHost>) {
	init_tracing();
	let catalog = Arc::new(catalog());
	let host = Arc::new(RecordingHost::default());
	let binder = Binder::new(catalog.clone(), host.clone())
		.with_scanner(catalog)
		.with_config(config);
	(binder, host)
}

pub fn binder() -> (Binder, Arc<RecordingHost>) {
	binder_with(BinderConfig::default())
}

pub fn ty(name: &str) -> Value {
	Value::Type(TypeHandle::new(name))
}

pub fn tester() -> Value {
	ty(TESTER)
}

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

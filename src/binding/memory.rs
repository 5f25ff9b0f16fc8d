//! In-memory [`BindingProvider`] for tests, demos, and hosts that resolve credentials themselves.

// self
use crate::{
	_prelude::*,
	binding::{BindingProvider, ServiceBinding},
	error::ConfigError,
};

/// Fixed map of instance names to bindings.
#[derive(Clone, Debug, Default)]
pub struct StaticBindings {
	bindings: HashMap<String, ServiceBinding>,
}
impl StaticBindings {
	/// Adds (or replaces) the binding for `instance`, consuming and returning `self`.
	pub fn with_binding(mut self, instance: impl Into<String>, binding: ServiceBinding) -> Self {
		self.insert(instance, binding);

		self
	}

	/// Adds (or replaces) the binding for `instance`.
	pub fn insert(&mut self, instance: impl Into<String>, binding: ServiceBinding) {
		self.bindings.insert(instance.into(), binding);
	}

	/// Number of registered bindings.
	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	/// Whether no binding is registered.
	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}
impl BindingProvider for StaticBindings {
	fn resolve(&self, instance: &str) -> Result<ServiceBinding> {
		self.bindings
			.get(instance)
			.cloned()
			.ok_or_else(|| ConfigError::BindingNotFound { instance: instance.to_owned() }.into())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ErrorKind;

	#[test]
	fn resolves_registered_instances_only() {
		let binding = ServiceBinding::builder()
			.url("https://auth.example.com")
			.uri("https://destination.example.com")
			.client_id("sb-client")
			.client_secret("secret")
			.build()
			.expect("Binding fixture should build.");
		let bindings = StaticBindings::default().with_binding("dest-service", binding);

		assert_eq!(bindings.len(), 1);

		let resolved =
			bindings.resolve("dest-service").expect("Registered instance should resolve.");

		assert_eq!(resolved.client_id.as_str(), "sb-client");

		let err = bindings.resolve("other").expect_err("Unknown instance should not resolve.");

		assert_eq!(err.kind(), ErrorKind::Config);
		assert_eq!(err.to_string(), "No service binding found for instance `other`.");
	}
}

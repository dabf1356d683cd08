//! Fake de `HostPlatform` para tests: asociaciones y entorno en memoria,
//! y registro de cada consulta y cada lanzamiento solicitado.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{HostPlatform, LaunchOutcome};
use crate::core::expand::expand_with;
use crate::core::ExecError;

/// Un lanzamiento pedido al fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub command_line: String,
    pub working_directory: String,
}

pub struct FakePlatform {
    associations: HashMap<String, String>,
    env: HashMap<String, String>,
    exit_code: Option<u32>,
    fail_launch: bool,
    queries: RefCell<Vec<String>>,
    launches: RefCell<Vec<LaunchRequest>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            associations: HashMap::new(),
            env: HashMap::new(),
            exit_code: Some(0),
            fail_launch: false,
            queries: RefCell::new(Vec::new()),
            launches: RefCell::new(Vec::new()),
        }
    }

    pub fn with_association(mut self, extension: &str, handler: &str) -> Self {
        self.associations.insert(extension.to_string(), handler.to_string());
        self
    }

    pub fn with_env(mut self, name: &str, value: &str) -> Self {
        self.env.insert(name.to_uppercase(), value.to_string());
        self
    }

    pub fn with_exit_code(mut self, code: u32) -> Self {
        self.exit_code = Some(code);
        self
    }

    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    pub fn association_queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }

    pub fn launches(&self) -> Vec<LaunchRequest> {
        self.launches.borrow().clone()
    }
}

impl HostPlatform for FakePlatform {
    fn query_executable(&self, extension: &str) -> Option<String> {
        self.queries.borrow_mut().push(extension.to_string());
        self.associations.get(extension).cloned()
    }

    fn expand_environment(&self, text: &str) -> String {
        expand_with(text, |name| self.env.get(&name.to_uppercase()).cloned())
    }

    fn launch_and_wait(
        &self,
        command_line: &str,
        working_directory: &str,
    ) -> Result<LaunchOutcome, ExecError> {
        self.launches.borrow_mut().push(LaunchRequest {
            command_line: command_line.to_string(),
            working_directory: working_directory.to_string(),
        });

        if self.fail_launch {
            return Err(ExecError::Spawn {
                command_line: command_line.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }

        Ok(LaunchOutcome {
            pid: 4242,
            exit_code: self.exit_code,
        })
    }
}

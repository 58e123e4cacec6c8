//! Multi-pass registration
//!
//! Each module registers its enums, types, inheritance edges and
//! properties in separate passes. [`Registry::register_all`] runs every
//! pass across all modules before the next one starts, so a module may
//! name parents and enums that another module registers.

use crate::error::Result;
use crate::registry::Registry;

pub trait Registration {
    fn register_enums(&self, _registry: &mut Registry) -> Result<()> {
        Ok(())
    }

    fn register_types(&self, _registry: &mut Registry) -> Result<()> {
        Ok(())
    }

    fn register_inheritance(&self, _registry: &mut Registry) -> Result<()> {
        Ok(())
    }

    fn register_properties(&self, _registry: &mut Registry) -> Result<()> {
        Ok(())
    }
}

impl Registry {
    /// Run the four passes over `modules`, in order.
    pub fn register_all(&mut self, modules: &[&dyn Registration]) -> Result<()> {
        for module in modules {
            module.register_enums(self)?;
        }
        for module in modules {
            module.register_types(self)?;
        }
        for module in modules {
            module.register_inheritance(self)?;
        }
        for module in modules {
            module.register_properties(self)?;
        }

        tracing::debug!(
            "registered {} modules: {} types, {} enums",
            modules.len(),
            self.len(),
            self.enums().len()
        );
        Ok(())
    }
}

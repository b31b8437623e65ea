use std::sync::Arc;

use bitflags::bitflags;
use tracing::{debug, trace};

use super::factory::NodeFactory;
use super::node::{Node, NodeFlags};
use crate::config::RewriteOptions;
use crate::error::{Result, RewriteError};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LexicalEnvironmentFlags: u8 {
        /// A parameter list is being visited.
        const IN_PARAMETERS = 1 << 0;
        /// A variable was hoisted while `IN_PARAMETERS` was set.
        const VARIABLES_HOISTED_IN_PARAMETERS = 1 << 1;
    }
}

/// Statements gathered while visiting one function-like construct.
#[derive(Debug, Default)]
pub struct LexicalEnvironmentFrame {
    variable_declarations: Vec<Arc<Node>>,
    function_declarations: Vec<Arc<Node>>,
    statements: Vec<Arc<Node>>,
    flags: LexicalEnvironmentFlags,
}

impl LexicalEnvironmentFrame {
    pub fn is_empty(&self) -> bool {
        self.variable_declarations.is_empty()
            && self.function_declarations.is_empty()
            && self.statements.is_empty()
    }
}

/// Stack of open frames. A frame is pushed by `start`, may be paused between
/// a parameter list and its body with `suspend`/`resume`, and is popped by
/// `end`, which hands back the statements to merge into the body.
#[derive(Debug, Default)]
pub struct LexicalEnvironment {
    frames: Vec<LexicalEnvironmentFrame>,
    suspended: bool,
}

impl LexicalEnvironment {
    pub fn new() -> Self {
        LexicalEnvironment::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn start(&mut self) -> Result<()> {
        if self.suspended {
            return Err(misuse("cannot start a lexical environment while suspended"));
        }
        self.frames.push(LexicalEnvironmentFrame::default());
        trace!("Started lexical environment at depth {}", self.frames.len());
        Ok(())
    }

    pub fn suspend(&mut self) -> Result<()> {
        if self.suspended {
            return Err(misuse("lexical environment is already suspended"));
        }
        if self.frames.is_empty() {
            return Err(misuse("no lexical environment to suspend"));
        }
        self.suspended = true;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        if !self.suspended {
            return Err(misuse("lexical environment is not suspended"));
        }
        self.suspended = false;
        Ok(())
    }

    /// Pops the current frame. The result holds the hoisted function
    /// declarations, then one `var` statement for all hoisted variables, then
    /// the initialization statements.
    pub fn end(&mut self, factory: &NodeFactory) -> Result<Vec<Arc<Node>>> {
        if self.suspended {
            return Err(misuse("cannot end a suspended lexical environment"));
        }
        let frame = self
            .frames
            .pop()
            .ok_or_else(|| misuse("no lexical environment to end"))?;
        trace!("Ended lexical environment at depth {}", self.frames.len() + 1);

        if frame.is_empty() {
            return Ok(Vec::new());
        }

        let mut statements = frame.function_declarations;
        if !frame.variable_declarations.is_empty() {
            let list = factory.create_variable_declaration_list(frame.variable_declarations, NodeFlags::empty());
            statements.push(factory.create_variable_statement(None, list));
        }
        statements.extend(frame.statements);
        debug!("Hoisting {} statement(s) out of lexical environment", statements.len());
        Ok(statements)
    }

    pub fn flags(&self) -> LexicalEnvironmentFlags {
        self.frames.last().map(|frame| frame.flags).unwrap_or_default()
    }

    pub fn set_flags(&mut self, flags: LexicalEnvironmentFlags, on: bool) -> Result<()> {
        let frame = self.current_frame()?;
        frame.flags.set(flags, on);
        Ok(())
    }

    pub fn hoist_variable_declaration(&mut self, declaration: Arc<Node>) -> Result<()> {
        let frame = self.current_frame()?;
        frame.variable_declarations.push(declaration);
        if frame.flags.contains(LexicalEnvironmentFlags::IN_PARAMETERS) {
            frame.flags.insert(LexicalEnvironmentFlags::VARIABLES_HOISTED_IN_PARAMETERS);
        }
        Ok(())
    }

    pub fn hoist_function_declaration(&mut self, declaration: Arc<Node>) -> Result<()> {
        self.current_frame()?.function_declarations.push(declaration);
        Ok(())
    }

    pub fn add_initialization_statement(&mut self, statement: Arc<Node>) -> Result<()> {
        self.current_frame()?.statements.push(statement);
        Ok(())
    }

    /// Checks that every frame was ended.
    pub fn finish(&self) -> Result<()> {
        if self.suspended || !self.frames.is_empty() {
            return Err(misuse(&format!(
                "{} lexical environment(s) left open{}",
                self.frames.len(),
                if self.suspended { " (suspended)" } else { "" }
            )));
        }
        Ok(())
    }

    fn current_frame(&mut self) -> Result<&mut LexicalEnvironmentFrame> {
        if self.suspended {
            return Err(misuse("lexical environment is suspended"));
        }
        self.frames
            .last_mut()
            .ok_or_else(|| misuse("no lexical environment has been started"))
    }
}

fn misuse(message: &str) -> RewriteError {
    RewriteError::LexicalEnvironment(message.to_string())
}

/// Everything a visitor needs besides the node: the factory, the options and
/// the lexical environment stack.
#[derive(Debug, Default)]
pub struct TransformationContext {
    pub factory: NodeFactory,
    pub options: RewriteOptions,
    environment: LexicalEnvironment,
}

impl TransformationContext {
    pub fn new(options: RewriteOptions) -> Self {
        TransformationContext {
            factory: NodeFactory::new(),
            options,
            environment: LexicalEnvironment::new(),
        }
    }

    pub fn environment(&self) -> &LexicalEnvironment {
        &self.environment
    }

    pub fn start_lexical_environment(&mut self) -> Result<()> {
        self.environment.start()
    }

    pub fn suspend_lexical_environment(&mut self) -> Result<()> {
        self.environment.suspend()
    }

    pub fn resume_lexical_environment(&mut self) -> Result<()> {
        self.environment.resume()
    }

    /// Ends the current frame. Once the outermost frame is gone the factory's
    /// per-node generated names are released.
    pub fn end_lexical_environment(&mut self) -> Result<Vec<Arc<Node>>> {
        let statements = self.environment.end(&self.factory)?;
        if self.environment.depth() == 0 {
            self.factory.release_generated_names();
        }
        Ok(statements)
    }

    /// Keeps temporary names clear of every identifier under `node`.
    pub fn reserve_names(&mut self, node: &Arc<Node>) {
        self.factory.reserve_names(node);
    }

    pub fn lexical_environment_flags(&self) -> LexicalEnvironmentFlags {
        self.environment.flags()
    }

    pub fn set_lexical_environment_flags(&mut self, flags: LexicalEnvironmentFlags, on: bool) -> Result<()> {
        self.environment.set_flags(flags, on)
    }

    /// Records `var name;` in the current frame.
    pub fn hoist_variable_declaration(&mut self, name: Arc<Node>) -> Result<()> {
        let declaration = self.factory.create_variable_declaration(name, None, None);
        self.environment.hoist_variable_declaration(declaration)
    }

    pub fn hoist_function_declaration(&mut self, declaration: Arc<Node>) -> Result<()> {
        self.environment.hoist_function_declaration(declaration)
    }

    pub fn add_initialization_statement(&mut self, statement: Arc<Node>) -> Result<()> {
        self.environment.add_initialization_statement(statement)
    }

    /// Mints a temporary identifier and hoists it as a variable, the usual
    /// way a transform obtains scratch storage.
    pub fn create_temp_variable(&mut self) -> Result<Arc<Node>> {
        let name = self.factory.create_temp_name();
        self.hoist_variable_declaration(Arc::clone(&name))?;
        Ok(name)
    }

    pub fn finish(&self) -> Result<()> {
        self.environment.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_orders_functions_then_vars_then_statements() {
        let mut ctx = TransformationContext::default();
        ctx.start_lexical_environment().unwrap();

        let init = ctx.factory.create_return(None);
        ctx.add_initialization_statement(Arc::clone(&init)).unwrap();
        let a = ctx.factory.create_identifier("a");
        ctx.hoist_variable_declaration(a).unwrap();
        let b = ctx.factory.create_identifier("b");
        ctx.hoist_variable_declaration(b).unwrap();
        let function = ctx.factory.create_function_declaration(None, vec![], None);
        ctx.hoist_function_declaration(Arc::clone(&function)).unwrap();

        let statements = ctx.end_lexical_environment().unwrap();
        assert_eq!(statements.len(), 3);
        assert!(Arc::ptr_eq(&statements[0], &function));
        let Node::VariableStatement(var) = &*statements[1] else { panic!("expected var statement") };
        let Node::VariableDeclarationList(list) = &*var.declaration_list else { panic!("expected list") };
        assert_eq!(list.declarations.len(), 2);
        assert!(Arc::ptr_eq(&statements[2], &init));
        assert!(ctx.finish().is_ok());
    }

    #[test]
    fn test_hoisting_in_parameters_sets_flag() {
        let mut env = LexicalEnvironment::new();
        let factory = NodeFactory::new();
        env.start().unwrap();
        env.set_flags(LexicalEnvironmentFlags::IN_PARAMETERS, true).unwrap();
        let name = factory.create_identifier("_a");
        env.hoist_variable_declaration(factory.create_variable_declaration(name, None, None))
            .unwrap();
        assert!(env.flags().contains(LexicalEnvironmentFlags::VARIABLES_HOISTED_IN_PARAMETERS));
        env.set_flags(LexicalEnvironmentFlags::IN_PARAMETERS, false).unwrap();
        assert!(!env.flags().contains(LexicalEnvironmentFlags::IN_PARAMETERS));
    }

    #[test]
    fn test_state_machine_misuse_is_reported() {
        let mut env = LexicalEnvironment::new();
        let factory = NodeFactory::new();
        assert!(env.end(&factory).is_err());
        assert!(env.suspend().is_err());
        assert!(env.resume().is_err());

        env.start().unwrap();
        env.suspend().unwrap();
        assert!(env.start().is_err());
        assert!(env.end(&factory).is_err());
        assert!(env.finish().is_err());
        env.resume().unwrap();
        assert!(env.end(&factory).unwrap().is_empty());
        assert!(env.finish().is_ok());
    }

    #[test]
    fn test_frames_nest() {
        let mut ctx = TransformationContext::default();
        ctx.start_lexical_environment().unwrap();
        ctx.start_lexical_environment().unwrap();
        let inner = ctx.factory.create_return(None);
        ctx.add_initialization_statement(inner).unwrap();
        assert_eq!(ctx.end_lexical_environment().unwrap().len(), 1);
        assert!(ctx.end_lexical_environment().unwrap().is_empty());
        assert_eq!(ctx.environment().depth(), 0);
    }
}

//! IR Printer - Emits IR nodes as generated source text
//!
//! Statements are printed one per line at the current indentation.
//! Expressions print inline, except object initializers, which open a brace
//! block on their own line:
//!
//! ```text
//! return new OrderDto(order.Id)
//! {
//!     Name = order.Name,
//!     Lines = order.Lines.Select(orderLine => new OrderLineDto
//!     {
//!         Sku = orderLine.Sku
//!     }).ToList()
//! };
//! ```

use crate::ir::{IRInitializer, IRNode};

pub const DEFAULT_INDENT: &str = "    ";

pub struct IRPrinter<'a> {
    output: String,
    indent_level: u32,
    indent_str: &'a str,
}

impl<'a> IRPrinter<'a> {
    pub fn new() -> Self {
        Self::with_indent(DEFAULT_INDENT)
    }

    pub fn with_indent(indent_str: &'a str) -> Self {
        Self {
            output: String::with_capacity(256),
            indent_level: 0,
            indent_str,
        }
    }

    /// Start printing at `level` instead of column zero.
    pub const fn set_indent_level(&mut self, level: u32) {
        self.indent_level = level;
    }

    pub const fn indent_level(&self) -> u32 {
        self.indent_level
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    pub fn take_output(self) -> String {
        self.output
    }

    /// Print `statements` at `level`, one per line, each terminated by a
    /// newline.
    pub fn print_statements(statements: &[IRNode], indent_str: &str, level: u32) -> String {
        let mut printer = IRPrinter::with_indent(indent_str);
        printer.set_indent_level(level);
        for statement in statements {
            printer.emit_statement(statement);
        }
        printer.take_output()
    }

    /// Print a single node with default indentation.
    pub fn emit_to_string(node: &IRNode) -> String {
        let mut printer = IRPrinter::new();
        printer.emit_node(node);
        printer.take_output()
    }

    /// Emit a statement on its own line. Bare expressions get a `;`.
    pub fn emit_statement(&mut self, node: &IRNode) {
        self.write_indent();
        self.emit_node(node);
        if !node.is_statement() {
            self.write(";");
        }
        self.write_line();
    }

    pub fn emit_node(&mut self, node: &IRNode) {
        match node {
            IRNode::Identifier(name) => self.write(name),
            IRNode::This => self.write("this"),
            IRNode::Default => self.write("default"),
            IRNode::PropertyAccess { object, property } => {
                self.emit_node(object);
                self.write(".");
                self.write(property);
            }
            IRNode::CallExpr { callee, arguments } => {
                self.emit_node(callee);
                self.write("(");
                self.emit_comma_separated(arguments);
                self.write(")");
            }
            IRNode::NewExpr {
                type_name,
                arguments,
                initializers,
            } => self.emit_new(type_name, arguments, initializers),
            IRNode::Lambda { parameter, body } => {
                self.write(parameter);
                self.write(" => ");
                self.emit_node(body);
            }
            IRNode::Cast { type_name, expr } => {
                self.write("(");
                self.write(type_name);
                self.write(")");
                self.emit_node(expr);
            }
            IRNode::Annotated { expr, comment } => {
                self.emit_node(expr);
                self.write(" /* ");
                self.write(comment);
                self.write(" */");
            }
            IRNode::Assignment { target, value } => {
                self.emit_node(target);
                self.write(" = ");
                self.emit_node(value);
                self.write(";");
            }
            IRNode::ReturnStatement(expr) => {
                self.write("return");
                if let Some(expr) = expr {
                    self.write(" ");
                    self.emit_node(expr);
                }
                self.write(";");
            }
            IRNode::Comment(text) => {
                self.write("// ");
                self.write(text);
            }
        }
    }

    fn emit_comma_separated(&mut self, nodes: &[IRNode]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_node(node);
        }
    }

    fn emit_new(&mut self, type_name: &str, arguments: &[IRNode], initializers: &[IRInitializer]) {
        self.write("new ");
        self.write(type_name);
        // `new T { .. }` needs no argument list.
        if !arguments.is_empty() || initializers.is_empty() {
            self.write("(");
            self.emit_comma_separated(arguments);
            self.write(")");
        }
        if initializers.is_empty() {
            return;
        }

        self.write_line();
        self.write_indent();
        self.write("{");
        self.write_line();
        self.increase_indent();

        let last_value = initializers.iter().rposition(|init| init.value.is_some());
        for (i, init) in initializers.iter().enumerate() {
            self.write_indent();
            match &init.value {
                Some(value) => {
                    self.write(&init.member);
                    self.write(" = ");
                    self.emit_node(value);
                    if Some(i) != last_value {
                        self.write(",");
                    }
                }
                None => {
                    self.write("// ");
                    self.write(init.comment.as_deref().unwrap_or(&init.member));
                }
            }
            self.write_line();
        }

        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_line(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

impl Default for IRPrinter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/ir_printer_tests.rs"]
mod tests;

use std::fmt::{self, Write};

use crate::codegen::assemble::{MockBlock, MockMethod};

const HEADER: &str = r#"
package mocks

import (
	"github.com/stretchr/testify/mock"
)
"#;

/// Writes the package header and one struct-plus-methods block per mock.
pub fn render<W: Write>(mocks: &[MockBlock], out: &mut W) -> fmt::Result {
    out.write_str(HEADER)?;
    for mock in mocks {
        write!(out, "\ntype {} struct {{\n\tmock.Mock\n}}", mock.name)?;
        for method in &mock.methods {
            out.write_str("\n\n")?;
            render_method(&mock.name, method, out)?;
        }
        out.write_char('\n')?;
    }
    Ok(())
}

fn render_method<W: Write>(receiver: &str, method: &MockMethod, out: &mut W) -> fmt::Result {
    write!(out, "func (m *{}) {}({})", receiver, method.name, method.params)?;
    if method.returns.is_empty() {
        return write!(out, " {{\n\t{}\n}}", method.call);
    }
    write!(
        out,
        " ({}) {{\n\targs := {}\n\treturn {}\n}}",
        method.results,
        method.call,
        method.returns.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn to_string(mocks: &[MockBlock]) -> String {
        let mut out = String::new();
        render(mocks, &mut out).unwrap();
        out
    }

    #[test]
    fn header_only_without_mocks() {
        assert_eq!(
            to_string(&[]),
            "\npackage mocks\n\nimport (\n\t\"github.com/stretchr/testify/mock\"\n)\n"
        );
    }

    #[test]
    fn method_without_results_has_no_return() {
        let mocks = vec![MockBlock {
            name: "aMock".to_string(),
            methods: vec![MockMethod {
                name: "Close".to_string(),
                params: "force bool".to_string(),
                results: String::new(),
                call: "m.Called(force)".to_string(),
                returns: vec![],
            }],
        }];
        let out = to_string(&mocks);
        assert!(out.ends_with(
            "\ntype aMock struct {\n\tmock.Mock\n}\n\nfunc (m *aMock) Close(force bool) {\n\tm.Called(force)\n}\n"
        ));
    }
}

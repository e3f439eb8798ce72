// SPDX-FileCopyrightText: 2022 Helsing GmbH
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write;

use oxrdf::NamedNodeRef;
use oxrdf::TermRef;
use oxrdf::vocab::{rdf, rdfs};

use crate::ast::{
    TLiteral, TName, TNamedNode, TObject, TPredicate, TPredicateCont, TRoot, TSection, TStatement,
    TSubject, construct_tree,
};
use crate::constants::{RACKET_LANG_LINE, SERIALIZER_VERSION};
use crate::context::Context;
use crate::error::FmtResult;
use crate::input::Input;
use crate::lexical::{self, escape_html};
use crate::literal::LiteralKey;
use crate::options::{FormatOptions, Variant};
use crate::prepare::{prepare, prune_mirrored};
use crate::rank::compute_ranks;

/// Does the actual formatting/pretty-printing.
///
/// Ranks everything in the graph first,
/// then builds the tree of the document in output order,
/// and finally writes it.
///
/// # Errors
///
/// If a symmetric predicate relates an IRI to itself,
/// or an I/O error occurs while writing to the in-memory buffer.
pub fn format(input: &Input, options: &FormatOptions) -> FmtResult<String> {
    let prepared = prepare(input, options)?;
    let tables = compute_ranks(&prepared.input, &options.order);
    let pruned = prune_mirrored(&prepared, &tables);
    let tree = construct_tree(&pruned, &tables, options);
    tracing::trace!("{tree:#?}");

    let mut output = String::new();
    let mut context = Context {
        depth: 0,
        output: &mut output,
    };
    TurtleFormatter::new(&pruned, options).fmt_doc(&mut context, &tree)?;
    Ok(output)
}

/// Line breaks, spaces and indentation,
/// which differ between the output modes and HTML.
struct Style {
    nl: &'static str,
    space: &'static str,
    /// One level of indentation.
    indent: String,
    /// Whether predicates, objects and list items go on lines of their own.
    newlines: bool,
    html: bool,
}

impl Style {
    fn new(options: &FormatOptions) -> Self {
        let html = matches!(options.variant, Variant::Html);
        let (nl, space) = if html {
            ("<br>\n", "\u{a0}")
        } else {
            ("\n", " ")
        };
        Self {
            nl,
            space,
            indent: space.repeat(options.indentation.chars().count()),
            newlines: options.output_mode.newlines(),
            html,
        }
    }
}

fn escape_attribute(value: &str) -> String {
    escape_html(value).replace('"', "&quot;")
}

/// An HTML link opening in a new tab,
/// with a tooltip if there is a `title`.
fn link(iri: &str, text: &str, title: Option<&str>) -> String {
    let href = escape_attribute(iri);
    match title {
        None => format!(r#"<a href="{href}" target="_blank">{text}</a>"#),
        Some(title) => {
            let title = escape_attribute(title);
            format!(
                r#"<div class="tip"><a href="{href}" target="_blank" title="{title}">{text}</a><div class="cont"> <div class="tooltip">{title}</div></div></div>"#
            )
        }
    }
}

struct TurtleFormatter<'graph> {
    input: &'graph Input,
    options: &'graph FormatOptions,
    style: Style,
}

impl<'graph> TurtleFormatter<'graph> {
    fn new(input: &'graph Input, options: &'graph FormatOptions) -> Self {
        Self {
            input,
            options,
            style: Style::new(options),
        }
    }

    fn write_indent<W: Write>(&self, context: &mut Context<W>, modifier: usize) -> FmtResult<()> {
        for _ in 0..(context.depth + modifier) {
            context.output.write_str(&self.style.indent)?;
        }
        Ok(())
    }

    fn write_space<W: Write>(&self, context: &mut Context<W>) -> FmtResult<()> {
        context.output.write_str(self.style.space)?;
        Ok(())
    }

    /// Writes a line break, and the indentation of the next line.
    fn write_new_line<W: Write>(&self, context: &mut Context<W>, modifier: usize) -> FmtResult<()> {
        context.output.write_str(self.style.nl)?;
        self.write_indent(context, modifier)
    }

    /// The IRI in angle brackets, escaped for HTML if required.
    fn bracketed(&self, iri: &str) -> String {
        if self.style.html {
            format!("&lt;{}&gt;", escape_html(iri))
        } else {
            format!("<{iri}>")
        }
    }

    fn fmt_base<W: Write>(&self, context: &mut Context<W>, tree: &TRoot<'_>) -> FmtResult<()> {
        if let Some(base) = &tree.base {
            write!(context.output, "@base {} .{}", self.bracketed(base), self.style.nl)?;
        }
        Ok(())
    }

    fn fmt_prefixes<W: Write>(&self, context: &mut Context<W>, tree: &TRoot<'_>) -> FmtResult<()> {
        for (prefix, namespace) in &tree.prefixes {
            write!(
                context.output,
                "@prefix {prefix}: {} .{}",
                self.bracketed(namespace),
                self.style.nl
            )?;
        }
        Ok(())
    }

    /// The smallest of the labels of `iri`,
    /// from the graph and from the extra HTML labels.
    fn html_label(&self, iri: NamedNodeRef<'_>) -> Option<String> {
        let sort_key = self.options.order.sort_key;
        let mut labels: Vec<oxrdf::Literal> = self
            .input
            .graph
            .objects_for_subject_predicate(iri, rdfs::LABEL)
            .filter_map(|label| match label {
                TermRef::Literal(literal) => Some(literal.into_owned()),
                TermRef::NamedNode(_) | TermRef::BlankNode(_) => None,
            })
            .collect();
        if let Some(extra) = self.options.html_labels.get(iri.as_str()) {
            labels.push(oxrdf::Literal::new_simple_literal(extra));
        }
        labels
            .into_iter()
            .min_by_key(|label| LiteralKey::new(label.as_ref(), sort_key))
            .map(|label| label.value().to_owned())
    }

    fn fmt_named_node<W: Write>(
        &self,
        context: &mut Context<W>,
        named_node: &TNamedNode<'_>,
        with_label: bool,
    ) -> FmtResult<()> {
        if named_node.node == rdf::NIL {
            context.output.write_str("()")?;
            return Ok(());
        }
        let text = match &named_node.name {
            TName::Prefixed(qname) => qname.to_string(),
            TName::Based(relative) => self.bracketed(relative),
            TName::Plain => self.bracketed(named_node.node.as_str()),
        };
        if self.style.html {
            let title = if with_label {
                self.html_label(named_node.node)
            } else {
                None
            };
            context.output.write_str(&link(
                named_node.node.as_str(),
                &text,
                title.as_deref(),
            ))?;
        } else {
            context.output.write_str(&text)?;
        }
        Ok(())
    }

    fn fmt_literal<W: Write>(
        &self,
        context: &mut Context<W>,
        literal: &TLiteral<'_>,
    ) -> FmtResult<()> {
        if let Some(plain) = lexical::plain_form(literal.literal) {
            context.output.write_str(plain)?;
            return Ok(());
        }
        let mut quoted = String::new();
        lexical::print_string(literal.literal.value(), &mut quoted)?;
        if self.style.html {
            quoted = escape_html(&quoted);
        }
        context.output.write_str(&quoted)?;
        if let Some(language) = literal.literal.language() {
            write!(context.output, "@{language}")?;
        } else if let Some(datatype) = &literal.datatype {
            context.output.write_str("^^")?;
            self.fmt_named_node(context, datatype, false)?;
        }
        Ok(())
    }

    fn fmt_blank_node_anonymous<W: Write>(
        &self,
        context: &mut Context<W>,
        predicates: &[TPredicateCont<'_>],
    ) -> FmtResult<()> {
        context.depth += 2;
        context.output.write_str("[")?;
        context.depth -= 1;
        if self.fmt_predicates(context, predicates)? {
            self.write_space(context)?;
        }
        context.output.write_str("]")?;
        context.depth -= 1;
        Ok(())
    }

    fn fmt_collection<W: Write>(
        &self,
        context: &mut Context<W>,
        items: &[TObject<'_>],
    ) -> FmtResult<()> {
        context.output.write_str("(")?;
        context.depth += 1;
        for item in items {
            if self.style.newlines {
                self.write_new_line(context, 1)?;
            }
            self.fmt_obj(context, item, self.style.newlines)?;
        }
        context.depth -= 1;
        self.write_space(context)?;
        context.output.write_str(")")?;
        Ok(())
    }

    /// Writes an object,
    /// preceded by a space unless it starts a new line.
    fn fmt_obj<W: Write>(
        &self,
        context: &mut Context<W>,
        obj: &TObject<'_>,
        newline: bool,
    ) -> FmtResult<()> {
        if !newline {
            self.write_space(context)?;
        }
        match obj {
            TObject::NamedNode(named_node) => self.fmt_named_node(context, named_node, true),
            TObject::BlankNodeLabel(label) => {
                context.output.write_str(label)?;
                Ok(())
            }
            TObject::BlankNodeAnonymous(predicates) => {
                self.fmt_blank_node_anonymous(context, predicates)
            }
            TObject::Collection(items) => self.fmt_collection(context, items),
            TObject::Literal(literal) => self.fmt_literal(context, literal),
        }
    }

    fn fmt_objects<W: Write>(
        &self,
        context: &mut Context<W>,
        objects: &[TObject<'_>],
    ) -> FmtResult<()> {
        let depth_mod = usize::from(objects.len() > 1);
        context.depth += depth_mod;
        let mut objects = objects.iter();
        if let Some(first) = objects.next() {
            self.fmt_obj(context, first, false)?;
        }
        for obj in objects {
            context.output.write_str(",")?;
            if self.style.newlines {
                self.write_new_line(context, 1)?;
            }
            self.fmt_obj(context, obj, self.style.newlines)?;
        }
        context.depth -= depth_mod;
        Ok(())
    }

    fn fmt_verb<W: Write>(
        &self,
        context: &mut Context<W>,
        predicate: &TPredicate<'_>,
        newline: bool,
    ) -> FmtResult<()> {
        if !newline {
            self.write_space(context)?;
        }
        match predicate {
            TPredicate::A => {
                context.output.write_str("a")?;
                Ok(())
            }
            TPredicate::NamedNode(named_node) => self.fmt_named_node(context, named_node, true),
        }
    }

    /// Returns whether anything was written.
    fn fmt_predicates<W: Write>(
        &self,
        context: &mut Context<W>,
        predicates: &[TPredicateCont<'_>],
    ) -> FmtResult<bool> {
        let mut predicates = predicates.iter();
        let Some(first) = predicates.next() else {
            return Ok(false);
        };
        self.fmt_verb(context, &first.predicate, false)?;
        self.fmt_objects(context, &first.objects)?;
        for predicate_cont in predicates {
            if self.style.newlines {
                self.write_space(context)?;
                context.output.write_str(";")?;
                self.write_new_line(context, 1)?;
            } else {
                context.output.write_str(";")?;
            }
            self.fmt_verb(context, &predicate_cont.predicate, self.style.newlines)?;
            self.fmt_objects(context, &predicate_cont.objects)?;
        }
        Ok(true)
    }

    fn fmt_statement<W: Write>(
        &self,
        context: &mut Context<W>,
        statement: &TStatement<'_>,
    ) -> FmtResult<()> {
        if self.style.newlines {
            self.write_new_line(context, 0)?;
        }
        match &statement.subject {
            TSubject::NamedNode(named_node) => self.fmt_named_node(context, named_node, true)?,
            TSubject::BlankNodeLabel(label) => context.output.write_str(label)?,
            TSubject::BlankNodeAnonymous => context.output.write_str("[]")?,
        }
        self.fmt_predicates(context, &statement.predicates)?;
        self.write_space(context)?;
        context.output.write_str(".")?;
        Ok(())
    }

    fn fmt_section<W: Write>(
        &self,
        context: &mut Context<W>,
        section: &TSection<'_>,
    ) -> FmtResult<()> {
        if let Some(header) = &section.header {
            if self.style.newlines {
                context.output.write_str(self.style.nl)?;
            }
            write!(
                context.output,
                "###{}{header}{}",
                self.style.space, self.style.nl
            )?;
        }
        for statement in &section.statements {
            self.fmt_statement(context, statement)?;
            context.output.write_str(self.style.nl)?;
        }
        Ok(())
    }

    fn fmt_doc<W: Write>(&self, context: &mut Context<W>, tree: &TRoot<'_>) -> FmtResult<()> {
        if matches!(self.options.variant, Variant::Racket) {
            write!(context.output, "{RACKET_LANG_LINE}{}", self.style.nl)?;
        }

        self.fmt_base(context, tree)?;

        self.fmt_prefixes(context, tree)?;

        for section in &tree.sections {
            self.fmt_section(context, section)?;
        }

        write!(
            context.output,
            "{nl}### Serialized using the {} serializer {SERIALIZER_VERSION}{nl}",
            self.options.serializer_name(),
            nl = self.style.nl
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links() {
        assert_eq!(
            link("http://example.org/a?b&c", "ex:a", None),
            r#"<a href="http://example.org/a?b&amp;c" target="_blank">ex:a</a>"#
        );
        assert_eq!(
            link("http://example.org/a", "ex:a", Some("an \"a\"")),
            r#"<div class="tip"><a href="http://example.org/a" target="_blank" title="an &quot;a&quot;">ex:a</a><div class="cont"> <div class="tooltip">an &quot;a&quot;</div></div></div>"#
        );
    }
}

//! Recursive-descent parser building the semantic graph
//!
//! Every construct function starts on the first token of its construct and
//! returns with `self.token` on the first token after it. Lexical errors
//! are reported and resynchronized inside `bump`; syntax errors are reported
//! where they are detected and then propagate to the nearest loop that can
//! recover from them.

use super::diagnostics::{Diagnostic, DiagnosticReporter};
use super::error::{SyntaxError, SyntaxResult};
use super::fundamental::FundamentalType;
use super::text::{normalize_doc, strip_unescaped_quotes};
use crate::config::compile_time::syntax::*;
use crate::config::runtime::{LexicalPreferences, ParserPreferences};
use crate::file_processor::{is_cli_path, FileProcessor};
use crate::lexical::Lexer;
use crate::logging::{self, codes};
use crate::semantics::{
    ClassId, ExpressionKind, IncludeTarget, Nameable, OptionId, ScopeId, SemanticError,
    SemanticGraph, UnitId,
};
use crate::tokens::{Keyword, PathKind, Punctuation, SpannedToken, Token};
use crate::utils::{Location, Position, Span, Spanned};
use crate::{log_debug, log_info, log_success};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ============================================================================
// SHARED CONTEXT
// ============================================================================

/// State shared by the parsers of a root file and all of its includes
pub struct ParserContext {
    pub graph: SemanticGraph,
    /// Canonical path of every `.cli` unit registered so far
    pub units_by_path: HashMap<PathBuf, UnitId>,
    pub reporter: DiagnosticReporter,
    preferences: ParserPreferences,
    lexical: LexicalPreferences,
    files: FileProcessor,
}

impl ParserContext {
    pub fn new(
        preferences: ParserPreferences,
        lexical: LexicalPreferences,
        reporter: DiagnosticReporter,
    ) -> Self {
        Self {
            graph: SemanticGraph::new(),
            units_by_path: HashMap::new(),
            reporter,
            preferences,
            lexical,
            files: FileProcessor::new().with_performance_logging(false),
        }
    }

    /// Create the unit for `canonical` and remember it so later includes of
    /// the same file reuse it.
    pub fn register_unit(&mut self, canonical: PathBuf) -> UnitId {
        let location = Location::new(&canonical, Position::start());
        let unit = self.graph.add_unit(canonical.clone(), location);
        self.units_by_path.insert(canonical, unit);
        unit
    }

    /// Parse `source` into the already registered `unit`; `path` names the
    /// file in diagnostics. Returns false if any error was found in this file
    /// or in anything it includes.
    pub fn parse_unit(&mut self, source: String, path: &Path, unit: UnitId) -> bool {
        self.parse_nested(source, path, unit, 0)
    }

    fn parse_nested(&mut self, source: String, path: &Path, unit: UnitId, depth: usize) -> bool {
        logging::with_file_context(path.to_path_buf(), depth, || {
            Parser::new(self, source, path, unit, depth).parse()
        })
    }

    pub fn into_parts(self) -> (SemanticGraph, HashMap<PathBuf, UnitId>, DiagnosticReporter) {
        (self.graph, self.units_by_path, self.reporter)
    }
}

// ============================================================================
// PARSER
// ============================================================================

struct Parser<'c> {
    ctx: &'c mut ParserContext,
    lexer: Lexer,
    path: PathBuf,
    unit: UnitId,
    token: SpannedToken,
    scope: ScopeId,
    /// Names of the enclosing namespaces and class, outermost first
    scope_path: Vec<String>,
    include_depth: usize,
    valid: bool,
}

fn literal_kind(token: &Token) -> Option<ExpressionKind> {
    match token {
        Token::StringLiteral(_) => Some(ExpressionKind::StringLit),
        Token::CharLiteral(_) => Some(ExpressionKind::CharLit),
        Token::BoolLiteral(_) => Some(ExpressionKind::BoolLit),
        Token::IntLiteral(_) => Some(ExpressionKind::IntLit),
        Token::FloatLiteral(_) => Some(ExpressionKind::FloatLit),
        Token::CallExpression(_) => Some(ExpressionKind::CallExpr),
        _ => None,
    }
}

impl<'c> Parser<'c> {
    fn new(
        ctx: &'c mut ParserContext,
        source: String,
        path: &Path,
        unit: UnitId,
        include_depth: usize,
    ) -> Self {
        let lexer = Lexer::with_preferences(source, ctx.lexical.clone());

        Self {
            ctx,
            lexer,
            path: path.to_path_buf(),
            unit,
            token: Spanned::new(Token::EndOfStream, Span::point(Position::start())),
            scope: ScopeId::Unit(unit),
            scope_path: Vec::new(),
            include_depth,
            valid: true,
        }
    }

    fn parse(mut self) -> bool {
        log_debug!("Parsing unit",
            "file" => self.path.display(),
            "include_depth" => self.include_depth
        );

        // A lexical error here has already been reported and skipped.
        let _ = self.bump();
        self.unit_body();

        let valid = self.valid && self.lexer.is_valid();
        let metrics = self.lexer.metrics();

        log_success!(codes::success::UNIT_PARSED, "Unit parsed",
            "file" => self.path.display(),
            "valid" => valid,
            "tokens" => metrics.total_tokens,
            "comments" => metrics.comment_count
        );

        valid
    }

    // ------------------------------------------------------------------------
    // Token handling and error reporting
    // ------------------------------------------------------------------------

    fn bump(&mut self) -> SyntaxResult<()> {
        match self.lexer.next_token() {
            Ok(token) => {
                self.token = token;
                Ok(())
            }
            Err(err) => {
                let err = SyntaxError::Lexical(err);
                self.report(&err);
                self.resynchronize();
                Err(err)
            }
        }
    }

    /// Step past an opening `{`. A lexical error here has already been
    /// reported and resynchronized, and the body starts at the token after
    /// the skipped `;`.
    fn bump_into_body(&mut self) {
        if let Err(err) = self.bump() {
            debug_assert!(err.is_lexical());
        }
    }

    /// After a lexical error: skip up to and past the next `;` and make the
    /// token after it current.
    fn resynchronize(&mut self) {
        let mut after_semicolon = false;

        loop {
            match self.lexer.next_token() {
                Ok(token) => {
                    if after_semicolon || token.value.is_eos() {
                        self.token = token;
                        return;
                    }
                    after_semicolon = token.value.is_punctuation(Punctuation::Semicolon);
                }
                Err(err) => {
                    self.report(&SyntaxError::Lexical(err));
                    after_semicolon = false;
                }
            }
        }
    }

    /// Statement-level recovery: skip past the next `;`
    fn recover(&mut self, err: &SyntaxError) {
        if err.is_lexical() {
            return;
        }

        loop {
            if self.token.value.is_eos() {
                return;
            }
            let at_semicolon = self.token.value.is_punctuation(Punctuation::Semicolon);
            if self.bump().is_err() || at_semicolon {
                return;
            }
        }
    }

    fn report(&mut self, err: &SyntaxError) {
        self.valid = false;
        let diagnostic =
            Diagnostic::new(&self.path, err.span().start, err.to_string(), err.error_code());
        self.ctx.reporter.report(diagnostic);
    }

    fn fail(&mut self, err: SyntaxError) -> SyntaxError {
        self.report(&err);
        err
    }

    fn unexpected(&mut self, expected: &str) -> SyntaxError {
        let err = SyntaxError::unexpected_token(expected, &self.token.value, self.token.span);
        self.fail(err)
    }

    fn expect_punctuation(&mut self, punctuation: Punctuation, expected: &str) -> SyntaxResult<()> {
        if self.token.value.is_punctuation(punctuation) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_identifier(&mut self) -> SyntaxResult<(String, Span)> {
        match &self.token.value {
            Token::Identifier(name) => Ok((name.clone(), self.token.span)),
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn location(&self, position: Position) -> Location {
        Location::new(&self.path, position)
    }

    /// Attach a naming edge in the current scope
    fn name(&mut self, target: Nameable, names: Vec<String>, span: Span) -> SyntaxResult<()> {
        let location = self.location(span.start);
        match self.ctx.graph.add_names(self.scope, target, names, location) {
            Ok(_) => Ok(()),
            Err(err) => Err(self.fail(SyntaxError::semantic(err, span))),
        }
    }

    /// Run `body` with `scope` as the current naming scope, restoring the
    /// enclosing scope on every exit path.
    fn with_scope<T>(
        &mut self,
        scope: ScopeId,
        name: &str,
        body: impl FnOnce(&mut Self) -> SyntaxResult<T>,
    ) -> SyntaxResult<T> {
        if self.scope_path.len() >= MAX_PARSE_DEPTH {
            return Err(self.fail(SyntaxError::MaxDepthExceeded {
                what: "scope",
                max: MAX_PARSE_DEPTH,
                span: self.token.span,
            }));
        }

        let outer = std::mem::replace(&mut self.scope, scope);
        self.scope_path.push(name.to_string());

        if self.ctx.preferences.log_scope_transitions {
            log_debug!("Entering scope", "scope" => self.scope_path.join("::"));
        }

        let result = body(self);

        if self.ctx.preferences.log_scope_transitions {
            log_debug!("Leaving scope", "scope" => self.scope_path.join("::"));
        }

        self.scope_path.pop();
        self.scope = outer;
        result
    }

    // ------------------------------------------------------------------------
    // Units and declarations
    // ------------------------------------------------------------------------

    fn unit_body(&mut self) {
        while self.token.value.is_keyword(Keyword::Include) {
            if let Err(err) = self.include_decl() {
                self.recover(&err);
            }
        }

        while !self.token.value.is_eos() {
            match self.decl() {
                Ok(true) => {}
                Ok(false) => {
                    self.unexpected("namespace or class declaration");
                    break;
                }
                Err(err) if err.is_lexical() => {}
                Err(_) => break,
            }
        }
    }

    fn decl(&mut self) -> SyntaxResult<bool> {
        match self.token.value.keyword() {
            Some(Keyword::Namespace) => self.namespace_def().map(|_| true),
            Some(Keyword::Class) => self.class_def().map(|_| true),
            _ => Ok(false),
        }
    }

    fn namespace_def(&mut self) -> SyntaxResult<()> {
        self.bump()?;
        let (name, span) = self.expect_identifier()?;

        let namespace = self.ctx.graph.add_namespace(self.location(span.start));
        self.name(Nameable::Namespace(namespace), vec![name.clone()], span)?;
        self.bump()?;

        self.expect_punctuation(Punctuation::LeftBrace, "'{'")?;
        self.bump_into_body();

        self.with_scope(ScopeId::Namespace(namespace), &name, |p| loop {
            match p.decl() {
                Ok(true) => {}
                Ok(false) => break Ok(()),
                Err(err) if err.is_lexical() => {}
                Err(err) => break Err(err),
            }
        })?;

        self.expect_punctuation(
            Punctuation::RightBrace,
            "namespace declaration, class declaration, or '}'",
        )?;
        self.bump()?;

        if self.token.value.is_punctuation(Punctuation::Semicolon) {
            self.bump()?;
        }
        Ok(())
    }

    fn class_def(&mut self) -> SyntaxResult<()> {
        self.bump()?;
        let (name, span) = self.expect_identifier()?;

        let class = self.ctx.graph.add_class(self.location(span.start));
        self.name(Nameable::Class(class), vec![name.clone()], span)?;
        self.bump()?;

        if self.token.value.is_punctuation(Punctuation::Colon) {
            self.bump()?;
            self.base_list(class)?;
        }

        if self.token.value.is_punctuation(Punctuation::Equals) {
            self.bump()?;
            if !matches!(&self.token.value, Token::IntLiteral(value) if value == "0") {
                return Err(self.unexpected("'0'"));
            }
            if let Err(err) = self.ctx.graph.set_abstract(class, true) {
                let span = self.token.span;
                return Err(self.fail(SyntaxError::semantic(err, span)));
            }
            self.bump()?;
        }

        self.expect_punctuation(Punctuation::LeftBrace, "'{'")?;
        self.bump_into_body();

        self.with_scope(ScopeId::Class(class), &name, |p| {
            p.class_body();
            Ok(())
        })?;

        self.expect_punctuation(Punctuation::RightBrace, "option declaration or '}'")?;
        self.bump()?;
        self.expect_punctuation(Punctuation::Semicolon, "';'")?;
        self.bump()?;
        Ok(())
    }

    fn class_body(&mut self) {
        loop {
            match self.option_def() {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => self.recover(&err),
            }
        }
    }

    /// Bases are resolved as they are read. An unresolved base is reported
    /// and skipped without aborting the class.
    fn base_list(&mut self, class: ClassId) -> SyntaxResult<()> {
        let mut count = 0usize;

        loop {
            let span = self.token.span;
            let Some(name) = self.qualified_name()? else {
                return Err(self.unexpected("base class name"));
            };

            count += 1;
            if count > MAX_BASE_CLASSES {
                return Err(self.fail(SyntaxError::grammar_violation(
                    format!("class has more than {} base classes", MAX_BASE_CLASSES),
                    span,
                )));
            }

            match self.ctx.graph.lookup_class(self.unit, &self.scope_path, &name) {
                Some(base) => {
                    let location = self.location(span.start);
                    self.ctx.graph.add_inherits(class, base, location);
                }
                None => {
                    self.report(&SyntaxError::semantic(
                        SemanticError::unresolved_base(&name),
                        span,
                    ));
                }
            }

            if !self.token.value.is_punctuation(Punctuation::Comma) {
                return Ok(());
            }
            self.bump()?;
        }
    }

    // ------------------------------------------------------------------------
    // Options
    // ------------------------------------------------------------------------

    /// Returns false, consuming nothing, when the current token cannot start
    /// an option.
    fn option_def(&mut self) -> SyntaxResult<bool> {
        let start = self.token.span;

        let type_name = match self.qualified_name()? {
            Some(name) => name,
            None => match self.fundamental_type()? {
                Some(name) => name,
                None => return Ok(false),
            },
        };

        let names = self.option_names()?;

        let location = self.location(start.start);
        let option = self.ctx.graph.add_option(location.clone());
        let type_id = self
            .ctx
            .graph
            .intern_type(self.unit, &type_name, location.clone());
        self.ctx.graph.set_belongs(option, type_id, location);
        self.name(Nameable::Option(option), names, start)?;

        if self.token.value.is_punctuation(Punctuation::Equals) {
            self.bump()?;
            self.assignment_initializer(option)?;
        } else if let Token::CallExpression(text) = &self.token.value {
            let text = text.clone();
            self.initialize(option, ExpressionKind::CallExpr, text, self.token.span.start);
            self.bump()?;
        }

        if self.token.value.is_punctuation(Punctuation::LeftBrace) {
            self.doc_block(option)?;
        }

        self.expect_punctuation(Punctuation::Semicolon, "';'")?;
        self.bump()?;
        Ok(true)
    }

    fn option_names(&mut self) -> SyntaxResult<Vec<String>> {
        let mut names = Vec::new();

        loop {
            match &self.token.value {
                Token::Identifier(name) => names.push(name.clone()),
                Token::StringLiteral(literal) => names.push(strip_unescaped_quotes(literal)),
                other => {
                    let message = format!("option name expected instead of {}", other);
                    let span = self.token.span;
                    return Err(self.fail(SyntaxError::grammar_violation(message, span)));
                }
            }

            self.bump()?;

            if !self.token.value.is_punctuation(Punctuation::Pipe) {
                return Ok(names);
            }
            self.bump()?;
        }
    }

    /// The value after `=`: a qualified name, a literal or a call expression
    fn assignment_initializer(&mut self, option: OptionId) -> SyntaxResult<()> {
        let at = self.token.span.start;

        if let Some(name) = self.qualified_name()? {
            self.initialize(option, ExpressionKind::Identifier, name, at);
            return Ok(());
        }

        let Some(kind) = literal_kind(&self.token.value) else {
            return Err(self.unexpected("initializer"));
        };

        let value = self.token.value.lexeme();
        self.initialize(option, kind, value, at);
        self.bump()
    }

    fn initialize(&mut self, option: OptionId, kind: ExpressionKind, value: String, at: Position) {
        let location = self.location(at);
        let expression = self.ctx.graph.add_expression(kind, value, location.clone());
        self.ctx.graph.set_initialized(option, expression, location);
    }

    fn doc_block(&mut self, option: OptionId) -> SyntaxResult<()> {
        loop {
            self.bump()?;

            let literal = match &self.token.value {
                Token::StringLiteral(literal) => literal.clone(),
                _ => return Err(self.unexpected("documentation string")),
            };
            let doc = normalize_doc(&strip_unescaped_quotes(&literal));
            self.ctx.graph.option_mut(option).doc.push(doc);

            self.bump()?;

            if !self.token.value.is_punctuation(Punctuation::Comma) {
                break;
            }
        }

        self.expect_punctuation(Punctuation::RightBrace, "'}'")?;
        self.bump()
    }

    // ------------------------------------------------------------------------
    // Names and types
    // ------------------------------------------------------------------------

    /// `'::'? identifier template-expr? ('::' identifier template-expr?)*`
    ///
    /// Returns None, consuming nothing, if the current token cannot start a
    /// name. Template arguments are kept verbatim.
    fn qualified_name(&mut self) -> SyntaxResult<Option<String>> {
        let absolute = self.token.value.is_punctuation(Punctuation::DoubleColon);
        if !absolute && self.token.value.identifier().is_none() {
            return Ok(None);
        }

        let mut name = String::new();
        if absolute {
            name.push_str("::");
            self.bump()?;
        }

        let mut segments = 0usize;

        loop {
            let segment = match self.token.value.identifier() {
                Some(segment) => segment.to_string(),
                None => {
                    let span = self.token.span;
                    return Err(self.fail(SyntaxError::grammar_violation(
                        "expected identifier after '::'",
                        span,
                    )));
                }
            };

            segments += 1;
            if segments > MAX_QUALIFIED_NAME_SEGMENTS {
                let span = self.token.span;
                return Err(self.fail(SyntaxError::grammar_violation(
                    format!(
                        "qualified name has more than {} components",
                        MAX_QUALIFIED_NAME_SEGMENTS
                    ),
                    span,
                )));
            }

            name.push_str(&segment);
            self.bump()?;

            if let Token::TemplateExpression(arguments) = &self.token.value {
                name.push_str(arguments);
                self.bump()?;
            }

            if !self.token.value.is_punctuation(Punctuation::DoubleColon) {
                return Ok(Some(name));
            }
            name.push_str("::");
            self.bump()?;
        }
    }

    fn fundamental_type(&mut self) -> SyntaxResult<Option<String>> {
        let mut ty = FundamentalType::new();

        while let Some(keyword) = self.token.value.keyword() {
            if !ty.accepts(keyword) {
                break;
            }
            ty.push(keyword);
            self.bump()?;
        }

        Ok((!ty.is_empty()).then(|| ty.canonical()))
    }

    // ------------------------------------------------------------------------
    // Includes
    // ------------------------------------------------------------------------

    fn include_decl(&mut self) -> SyntaxResult<()> {
        self.lexer.expect_path_literal();
        self.bump()?;

        let (kind, path) = match &self.token.value {
            Token::PathLiteral { kind, path } => (*kind, path.clone()),
            _ => return Err(self.unexpected("path literal")),
        };

        let span = self.token.span;
        self.include(kind, &path, span);

        self.bump()?;
        self.expect_punctuation(Punctuation::Semicolon, "';'")?;
        self.bump()
    }

    /// Record an include edge, parsing the target first if it is a `.cli`
    /// file not seen before. Failures are reported but do not interrupt the
    /// including file.
    fn include(&mut self, kind: PathKind, path: &str, span: Span) {
        let location = self.location(span.start);

        if path.trim().is_empty() {
            self.report(&SyntaxError::InvalidIncludePath {
                path: path.to_string(),
                span,
            });
            return;
        }

        if !is_cli_path(path) {
            let cxx = self.ctx.graph.add_cxx_unit(path, location.clone());
            self.ctx
                .graph
                .add_includes(self.unit, IncludeTarget::Cxx(cxx), path, kind, location);
            return;
        }

        let Some(found) = self.locate_include(kind, path) else {
            self.report(&SyntaxError::IncludeNotFound {
                path: path.to_string(),
                span,
            });
            return;
        };

        let canonical = match found.canonicalize() {
            Ok(canonical) => canonical,
            Err(err) => {
                self.report(&SyntaxError::IncludeUnreadable {
                    path: found.display().to_string(),
                    reason: err.to_string(),
                    span,
                });
                return;
            }
        };

        if let Some(&existing) = self.ctx.units_by_path.get(&canonical) {
            self.ctx
                .graph
                .add_includes(self.unit, IncludeTarget::Cli(existing), path, kind, location);
            log_debug!("Include already parsed", "file" => canonical.display());
            return;
        }

        if self.include_depth >= MAX_INCLUDE_DEPTH {
            self.report(&SyntaxError::MaxDepthExceeded {
                what: "include",
                max: MAX_INCLUDE_DEPTH,
                span,
            });
            return;
        }

        let source = match self.ctx.files.process_file(&found) {
            Ok(file) => file.source,
            Err(err) => {
                self.report(&SyntaxError::IncludeUnreadable {
                    path: found.display().to_string(),
                    reason: err.to_string(),
                    span,
                });
                return;
            }
        };

        let unit = self.ctx.register_unit(canonical.clone());
        self.ctx
            .graph
            .add_includes(self.unit, IncludeTarget::Cli(unit), path, kind, location);

        if self.ctx.preferences.log_include_resolution {
            log_info!("Resolved include",
                "include" => path,
                "file" => canonical.display(),
                "depth" => self.include_depth + 1
            );
        }

        if !self
            .ctx
            .parse_nested(source, &found, unit, self.include_depth + 1)
        {
            self.valid = false;
        }
    }

    /// Quoted paths are relative to the including file; bracketed paths are
    /// tried against each search directory in order.
    fn locate_include(&self, kind: PathKind, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);

        if relative.is_absolute() {
            return relative.is_file().then(|| relative.to_path_buf());
        }

        match kind {
            PathKind::Quoted => {
                let candidate = self
                    .path
                    .parent()
                    .map(|dir| dir.join(relative))
                    .unwrap_or_else(|| relative.to_path_buf());
                candidate.is_file().then_some(candidate)
            }
            PathKind::Bracketed => self
                .ctx
                .preferences
                .include_search_paths
                .iter()
                .map(|dir| dir.join(relative))
                .find(|candidate| candidate.is_file()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::NamesId;

    struct Parsed {
        graph: SemanticGraph,
        root: UnitId,
        valid: bool,
        messages: Vec<String>,
    }

    fn parse(source: &str) -> Parsed {
        let mut ctx = ParserContext::new(
            ParserPreferences::default(),
            LexicalPreferences::default(),
            DiagnosticReporter::silent(),
        );
        let root = ctx.register_unit(PathBuf::from("/virtual/test.cli"));
        let valid = ctx.parse_unit(source.to_string(), Path::new("test.cli"), root);
        let (graph, _, reporter) = ctx.into_parts();

        Parsed {
            graph,
            root,
            valid,
            messages: reporter
                .into_diagnostics()
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }

    impl Parsed {
        fn global_names(&self) -> Vec<&str> {
            self.names_in(ScopeId::Unit(self.root))
        }

        fn names_in(&self, scope: ScopeId) -> Vec<&str> {
            self.graph
                .scope(scope)
                .names()
                .iter()
                .map(|&id: &NamesId| self.graph.names_edge(id).name())
                .collect()
        }

        fn target(&self, scope: ScopeId, name: &str) -> Nameable {
            let ids = self.graph.scope(scope).find(name);
            assert_eq!(ids.len(), 1, "'{}' should be declared once", name);
            self.graph.names_edge(ids[0]).target
        }

        fn class(&self, scope: ScopeId, name: &str) -> ClassId {
            match self.target(scope, name) {
                Nameable::Class(id) => id,
                other => panic!("'{}' is {:?}", name, other),
            }
        }

        fn option(&self, scope: ScopeId, name: &str) -> OptionId {
            match self.target(scope, name) {
                Nameable::Option(id) => id,
                other => panic!("'{}' is {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_top_level_declarations_in_order() {
        let parsed = parse("namespace a {} class b {}; namespace c {};");
        assert!(parsed.valid, "{:?}", parsed.messages);
        assert_eq!(parsed.global_names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_nested_namespace_scenario() {
        let parsed = parse("namespace n{ class c{ bool v|verbose; }; };");
        assert!(parsed.valid, "{:?}", parsed.messages);

        let global = ScopeId::Unit(parsed.root);
        let Nameable::Namespace(n) = parsed.target(global, "n") else {
            panic!("n is not a namespace");
        };
        let c = parsed.class(ScopeId::Namespace(n), "c");
        let option = parsed.option(ScopeId::Class(c), "verbose");

        assert_eq!(parsed.graph.names_of(Nameable::Option(option)), ["v", "verbose"]);
        assert_eq!(parsed.graph.option_type(option).unwrap().spelling, "bool");
        assert!(parsed.graph.initializer(option).is_none());
        assert!(parsed.graph.option(option).doc.is_empty());
    }

    #[test]
    fn test_aliases_resolve_to_one_option() {
        let parsed = parse("class c { int foo|bar; };");
        let c = parsed.class(ScopeId::Unit(parsed.root), "c");
        let scope = ScopeId::Class(c);

        assert_eq!(parsed.option(scope, "foo"), parsed.option(scope, "bar"));
        assert_eq!(parsed.names_in(scope), vec!["foo"]);
    }

    #[test]
    fn test_quoted_option_names() {
        let parsed = parse(r#"class c { bool "--long name"|-l; };"#);
        let c = parsed.class(ScopeId::Unit(parsed.root), "c");
        let option = parsed.option(ScopeId::Class(c), "--long name");
        assert_eq!(
            parsed.graph.names_of(Nameable::Option(option)),
            ["--long name", "-l"]
        );
    }

    #[test]
    fn test_call_expression_initializer() {
        let parsed = parse("class c { int x = (1, 2); std::string y (\"a\"); };");
        assert!(parsed.valid, "{:?}", parsed.messages);
        let scope = ScopeId::Class(parsed.class(ScopeId::Unit(parsed.root), "c"));

        let x = parsed.graph.initializer(parsed.option(scope, "x")).unwrap();
        assert_eq!(x.kind, ExpressionKind::CallExpr);
        assert_eq!(x.value, "(1, 2)");

        let y = parsed.option(scope, "y");
        assert_eq!(parsed.graph.option_type(y).unwrap().spelling, "std::string");
        assert_eq!(parsed.graph.initializer(y).unwrap().value, "(\"a\")");
    }

    #[test]
    fn test_literal_and_identifier_initializers() {
        let parsed = parse(
            "class c { int a = -5; double b = 1.5; bool d = true; char e = 'x'; \
             std::string f = \"s\"; level g = ::levels::high; };",
        );
        assert!(parsed.valid, "{:?}", parsed.messages);
        let scope = ScopeId::Class(parsed.class(ScopeId::Unit(parsed.root), "c"));

        let expect = |name: &str, kind: ExpressionKind, value: &str| {
            let expr = parsed.graph.initializer(parsed.option(scope, name)).unwrap();
            assert_eq!(expr.kind, kind, "{}", name);
            assert_eq!(expr.value, value, "{}", name);
        };

        expect("a", ExpressionKind::IntLit, "-5");
        expect("b", ExpressionKind::FloatLit, "1.5");
        expect("d", ExpressionKind::BoolLit, "true");
        expect("e", ExpressionKind::CharLit, "'x'");
        expect("f", ExpressionKind::StringLit, "\"s\"");
        expect("g", ExpressionKind::Identifier, "::levels::high");
    }

    #[test]
    fn test_fundamental_types_are_canonical_and_interned() {
        let parsed = parse("class c { int unsigned long long a; unsigned long long int b; };");
        assert!(parsed.valid, "{:?}", parsed.messages);
        let scope = ScopeId::Class(parsed.class(ScopeId::Unit(parsed.root), "c"));

        let a = parsed.graph.option(parsed.option(scope, "a")).belongs.unwrap();
        let b = parsed.graph.option(parsed.option(scope, "b")).belongs.unwrap();
        assert_eq!(
            parsed.graph.belongs_edge(a).type_id,
            parsed.graph.belongs_edge(b).type_id
        );
        assert_eq!(
            parsed.graph.option_type(parsed.option(scope, "a")).unwrap().spelling,
            "unsigned long long int"
        );
        assert_eq!(parsed.graph.unit(parsed.root).types.len(), 1);
    }

    #[test]
    fn test_template_type() {
        let parsed = parse("class c { std::vector<std::string> files; };");
        assert!(parsed.valid, "{:?}", parsed.messages);
        let scope = ScopeId::Class(parsed.class(ScopeId::Unit(parsed.root), "c"));
        assert_eq!(
            parsed.graph.option_type(parsed.option(scope, "files")).unwrap().spelling,
            "std::vector<std::string>"
        );
    }

    #[test]
    fn test_documentation_is_normalized() {
        let parsed = parse(
            "class c { bool v { \"  line one  \n\n  line two  \", \"second\n string\" }; };",
        );
        assert!(parsed.valid, "{:?}", parsed.messages);
        let scope = ScopeId::Class(parsed.class(ScopeId::Unit(parsed.root), "c"));
        let option = parsed.graph.option(parsed.option(scope, "v"));
        assert_eq!(option.doc, vec!["line one\nline two", "second string"]);
    }

    #[test]
    fn test_one_bad_option_does_not_lose_the_next() {
        let parsed = parse("class c { int ; bool good; };");

        assert!(!parsed.valid);
        assert_eq!(
            parsed.messages,
            vec!["test.cli:1:15: error: option name expected instead of ';'"]
        );
        let scope = ScopeId::Class(parsed.class(ScopeId::Unit(parsed.root), "c"));
        parsed.option(scope, "good");
    }

    #[test]
    fn test_lexical_error_recovers_at_statement() {
        let parsed = parse("class c { int x = $; bool y; };");

        assert!(!parsed.valid);
        assert_eq!(parsed.messages.len(), 1);
        assert!(parsed.messages[0].ends_with("error: unexpected character '$'"));
        let scope = ScopeId::Class(parsed.class(ScopeId::Unit(parsed.root), "c"));
        parsed.option(scope, "y");
    }

    #[test]
    fn test_lexical_error_in_namespace_body_keeps_scope() {
        let parsed = parse("namespace n { $ ; class b {}; };");

        assert!(!parsed.valid);
        assert_eq!(
            parsed.messages,
            vec!["test.cli:1:15: error: unexpected character '$'"]
        );
        assert_eq!(parsed.global_names(), vec!["n"]);
        let Nameable::Namespace(n) = parsed.target(ScopeId::Unit(parsed.root), "n") else {
            panic!("n is not a namespace");
        };
        assert_eq!(parsed.names_in(ScopeId::Namespace(n)), vec!["b"]);
    }

    #[test]
    fn test_lexical_error_in_nested_declaration_keeps_scope() {
        let parsed = parse("namespace n { class $ ; class b { bool v; }; }; class after {};");

        assert!(!parsed.valid);
        assert_eq!(parsed.messages.len(), 1);
        assert_eq!(parsed.global_names(), vec!["n", "after"]);
        let Nameable::Namespace(n) = parsed.target(ScopeId::Unit(parsed.root), "n") else {
            panic!("n is not a namespace");
        };
        assert_eq!(parsed.names_in(ScopeId::Namespace(n)), vec!["b"]);
    }

    #[test]
    fn test_lexical_error_at_start_of_class_body() {
        let parsed = parse("class c { $ ; bool v; };");

        assert_eq!(parsed.messages.len(), 1);
        let scope = ScopeId::Class(parsed.class(ScopeId::Unit(parsed.root), "c"));
        parsed.option(scope, "v");
    }

    #[test]
    fn test_short_long_is_a_fundamental_type() {
        let parsed = parse("class c { short long x; short long unsigned int y; };");
        assert!(parsed.valid, "{:?}", parsed.messages);

        let scope = ScopeId::Class(parsed.class(ScopeId::Unit(parsed.root), "c"));
        assert_eq!(
            parsed.graph.option_type(parsed.option(scope, "x")).unwrap().spelling,
            "short long"
        );
        assert_eq!(
            parsed.graph.option_type(parsed.option(scope, "y")).unwrap().spelling,
            "unsigned short long int"
        );
    }

    #[test]
    fn test_abstract_class_with_unresolved_base() {
        let parsed = parse("class c : b = 0 { };");

        assert!(!parsed.valid);
        assert_eq!(
            parsed.messages,
            vec!["test.cli:1:11: error: unable to resolve base class 'b'"]
        );
        let c = parsed.class(ScopeId::Unit(parsed.root), "c");
        assert!(parsed.graph.class(c).is_abstract());
        assert_eq!(parsed.graph.bases(c).count(), 0);
    }

    #[test]
    fn test_bases_resolve_through_outer_scopes() {
        let parsed = parse(
            "class base {}; namespace n { class mid : base {}; class leaf : mid, ::base {}; };",
        );
        assert!(parsed.valid, "{:?}", parsed.messages);

        let global = ScopeId::Unit(parsed.root);
        let base = parsed.class(global, "base");
        let Nameable::Namespace(n) = parsed.target(global, "n") else {
            panic!("n is not a namespace");
        };
        let mid = parsed.class(ScopeId::Namespace(n), "mid");
        let leaf = parsed.class(ScopeId::Namespace(n), "leaf");

        assert_eq!(parsed.graph.bases(mid).collect::<Vec<_>>(), vec![base]);
        assert_eq!(parsed.graph.bases(leaf).collect::<Vec<_>>(), vec![mid, base]);
    }

    #[test]
    fn test_non_declaration_stops_unit() {
        let parsed = parse("class a {}; int x; class b {};");

        assert!(!parsed.valid);
        assert_eq!(
            parsed.messages,
            vec!["test.cli:1:13: error: expected namespace or class declaration instead of keyword 'int'"]
        );
        assert_eq!(parsed.global_names(), vec!["a"]);
    }

    #[test]
    fn test_missing_class_semicolon() {
        let parsed = parse("class a {}");
        assert_eq!(
            parsed.messages,
            vec!["test.cli:1:11: error: expected ';' instead of end-of-stream"]
        );
    }

    #[test]
    fn test_namespace_body_error() {
        let parsed = parse("namespace n { int }");
        assert_eq!(
            parsed.messages,
            vec!["test.cli:1:15: error: expected namespace declaration, class declaration, or '}' instead of keyword 'int'"]
        );
    }

    #[test]
    fn test_scope_is_restored_after_aborted_namespace() {
        let parsed = parse("namespace n { class c { }; ");
        assert!(!parsed.valid);

        let global = ScopeId::Unit(parsed.root);
        assert_eq!(parsed.global_names(), vec!["n"]);
        let Nameable::Namespace(n) = parsed.target(global, "n") else {
            panic!("n is not a namespace");
        };
        assert_eq!(parsed.names_in(ScopeId::Namespace(n)), vec!["c"]);
    }

    #[test]
    fn test_include_errors() {
        let parsed = parse("include ;");
        assert_eq!(
            parsed.messages,
            vec!["test.cli:1:9: error: expected path literal instead of ';'"]
        );

        let parsed = parse("include \"missing.cli\";\nclass c {};");
        assert_eq!(
            parsed.messages,
            vec!["test.cli:1:9: error: unable to find include file 'missing.cli'"]
        );
        assert_eq!(parsed.global_names(), vec!["c"]);
    }

    #[test]
    fn test_empty_include_path() {
        let parsed = parse("include \"\";");
        assert_eq!(
            parsed.messages,
            vec!["test.cli:1:9: error: invalid include path ''"]
        );
        assert!(parsed.graph.unit(parsed.root).includes.is_empty());
    }

    #[test]
    fn test_cxx_include_is_opaque() {
        let parsed = parse("include <string>;\ninclude \"types.hxx\";\nclass c {};");
        assert!(parsed.valid, "{:?}", parsed.messages);

        let unit = parsed.graph.unit(parsed.root);
        let spellings: Vec<String> = unit
            .includes
            .iter()
            .map(|&id| parsed.graph.includes_edge(id).spelling())
            .collect();
        assert_eq!(spellings, vec!["<string>", "\"types.hxx\""]);
        assert_eq!(parsed.graph.cxx_unit_count(), 2);
    }

    #[test]
    fn test_qualified_name_requires_identifier() {
        let parsed = parse("class c { a:: ; };");
        assert_eq!(
            parsed.messages,
            vec!["test.cli:1:15: error: expected identifier after '::'"]
        );
    }

    #[test]
    fn test_documentation_errors() {
        let parsed = parse("class c { bool v { 1 }; bool w; };");
        assert_eq!(
            parsed.messages,
            vec!["test.cli:1:20: error: expected documentation string instead of integer literal"]
        );
        let scope = ScopeId::Class(parsed.class(ScopeId::Unit(parsed.root), "c"));
        parsed.option(scope, "w");
    }

    #[test]
    fn test_bad_initializer() {
        let parsed = parse("class c { int v = ; };");
        assert_eq!(
            parsed.messages,
            vec!["test.cli:1:19: error: expected initializer instead of ';'"]
        );
    }
}

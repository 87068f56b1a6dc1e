use super::{
    assignment::{Binding, Countermodel},
    variables::*,
};
use crate::{
    config::{Connectives, EvaluationOptions},
    definitions::*,
    element::{Element, ElementList, Operator},
    error::{EvaluationError, EvaluationErrorKind, EvaluationResult},
    model::{Entity, Model, SharedFunction, SharedPredicate},
    trail::Trail,
    types::Arity,
};
use tracing::debug;

use EvaluationErrorKind::*;

/// Evaluates formulas and terms within one [`Model`] under the current assignment of the subject,
/// predicate and function variables.
///
/// Free variables are allocated on first reference with selection `0`; [`next`](Self::next)
/// advances to the next assignment. Variables bound by quantifiers and classes are only allocated
/// while their scope is evaluated.
pub struct Interpreter<'a> {
    model: &'a Model,
    resolver: &'a dyn ModuleResolver,
    options: EvaluationOptions,
    subjects: SubjectVariables<'a>,
    predicates: PredicateVariables<'a>,
    functions: FunctionVariables<'a>,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        model: &'a Model,
        resolver: &'a dyn ModuleResolver,
        options: EvaluationOptions,
    ) -> Self {
        Interpreter {
            model,
            resolver,
            options,
            subjects: SubjectVariables::new(),
            predicates: PredicateVariables::new(),
            functions: FunctionVariables::new(),
        }
    }

    pub fn model(&self) -> &'a Model {
        self.model
    }

    pub fn subjects(&self) -> &SubjectVariables<'a> {
        &self.subjects
    }

    pub fn predicates(&self) -> &PredicateVariables<'a> {
        &self.predicates
    }

    pub fn functions(&self) -> &FunctionVariables<'a> {
        &self.functions
    }

    /// Evaluates `formula`, resolving constants from the definitions of `module`
    pub fn evaluate_formula(
        &mut self,
        module: &'a ModuleDefinitions,
        formula: &'a Element,
    ) -> EvaluationResult<bool> {
        self.formula(module, formula, &Trail::root(module.label()))
    }

    /// Evaluates `term`, resolving constants from the definitions of `module`
    pub fn evaluate_term(
        &mut self,
        module: &'a ModuleDefinitions,
        term: &'a Element,
    ) -> EvaluationResult<Entity> {
        self.term(module, term, &Trail::root(module.label()))
    }

    /// Advances to the next assignment of the free variables: subject variables vary fastest,
    /// then predicate variables, then function variables. Returns `false` once all assignments
    /// were visited.
    pub fn next(&mut self) -> bool {
        self.subjects.next(self.model)
            || self.predicates.next(self.model)
            || self.functions.next(self.model)
    }

    /// Evaluates the body of a predicate definition of `module` for the given arguments
    pub fn calculate_predicate_value(
        &mut self,
        module: &'a ModuleDefinitions,
        definition: &'a PredicateDefinition,
        arguments: &[Entity],
    ) -> EvaluationResult<bool> {
        let trail = Trail::root(module.label());
        check_parameters(definition.name(), definition.arity(), arguments, &trail)?;
        self.defined_predicate(module, definition, arguments, &trail)
    }

    /// Evaluates the body of a function definition of `module` for the given arguments
    pub fn calculate_function_value(
        &mut self,
        module: &'a ModuleDefinitions,
        definition: &'a FunctionDefinition,
        arguments: &[Entity],
    ) -> EvaluationResult<Entity> {
        let trail = Trail::root(module.label());
        check_parameters(definition.name(), definition.arity(), arguments, &trail)?;
        self.defined_function(module, definition, arguments, &trail)
    }

    /// Records the current assignment of all allocated variables
    pub fn countermodel(&self) -> Countermodel {
        let model = self.model;
        Countermodel {
            model: model.name().to_owned(),
            subjects: self
                .subjects
                .iter()
                .map(|(v, s)| Binding::new(v.name, 0, s, model.entity(s).label()))
                .collect(),
            predicates: self
                .predicates
                .iter()
                .map(|(v, s)| Binding::new(v.name, v.arity, s, model.predicate(v.arity, s).name()))
                .collect(),
            functions: self
                .functions
                .iter()
                .map(|(v, s)| Binding::new(v.name, v.arity, s, model.function(v.arity, s).name()))
                .collect(),
        }
    }

    /// Replaces the current assignment by the one recorded in `countermodel`
    ///
    /// # Errors
    /// `Internal` if the countermodel was recorded in another model or selects something this
    /// model does not have
    pub fn restore(&mut self, countermodel: &'a Countermodel) -> EvaluationResult<()> {
        let model = self.model;
        let fail = |message: String| {
            Err(EvaluationError::new(
                Internal(message),
                Trail::root(&countermodel.model).to_string(),
            ))
        };
        if countermodel.model != model.name() {
            return fail(format!(
                "countermodel of model {} cannot be used in model {}",
                countermodel.model,
                model.name()
            ));
        }
        self.subjects.clear();
        self.predicates.clear();
        self.functions.clear();
        for b in &countermodel.subjects {
            let key = SubjectVariable::new(&b.name);
            if b.selection >= key.bound(model) {
                return fail(format!("no entity {} for {}", b.selection, b.name));
            }
            self.subjects.force_add(key, b.selection);
        }
        for b in &countermodel.predicates {
            let key = PredicateVariable::new(&b.name, b.arity);
            if b.selection >= key.bound(model) {
                return fail(format!("no predicate {} for {}", b.selection, b.name));
            }
            self.predicates.force_add(key, b.selection);
        }
        for b in &countermodel.functions {
            let key = FunctionVariable::new(&b.name, b.arity);
            if b.selection >= key.bound(model) {
                return fail(format!("no function {} for {}", b.selection, b.name));
            }
            self.functions.force_add(key, b.selection);
        }
        Ok(())
    }

    fn short_circuit(&self) -> bool {
        self.options.connectives == Connectives::ShortCircuit
    }

    fn check_depth(&self, trail: &Trail<'_>) -> EvaluationResult<()> {
        if trail.depth() > self.options.max_depth {
            Err(error(DepthExceeded(self.options.max_depth), trail))
        } else {
            Ok(())
        }
    }

    fn formula(
        &mut self,
        scope: &'a ModuleDefinitions,
        element: &'a Element,
        trail: &Trail<'_>,
    ) -> EvaluationResult<bool> {
        self.check_depth(trail)?;
        let list = list(element, trail)?;
        let operator = Operator::from_tag(list.operator())
            .filter(|op| !op.is_term())
            .ok_or_else(|| error(UnknownOperator(list.operator().to_owned()), trail))?;
        match operator {
            Operator::Conjunction => self.connective(scope, list, false, trail),
            Operator::Disjunction => self.connective(scope, list, true, trail),
            Operator::Negation => self.negation(scope, list, trail),
            Operator::Implication => self.implication(scope, list, trail),
            Operator::Equivalence => self.equivalence(scope, list, trail),
            Operator::PredicateVariable => self.predicate_variable(scope, list, trail),
            Operator::PredicateConstant => self.predicate_constant(scope, list, trail),
            Operator::Universal | Operator::Existential | Operator::UniqueExistential => {
                self.quantifier(operator, scope, list, trail)
            }
            _ => Err(error(UnknownOperator(list.operator().to_owned()), trail)),
        }
    }

    /// Conjunction (`decisive == false`) or disjunction (`decisive == true`): the first child with
    /// the decisive value determines the result.
    fn connective(
        &mut self,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        decisive: bool,
        trail: &Trail<'_>,
    ) -> EvaluationResult<bool> {
        let mut result = !decisive;
        for (i, child) in list.elements().iter().enumerate() {
            if self.formula(scope, child, &trail.child(i))? == decisive {
                result = decisive;
                if self.short_circuit() {
                    break;
                }
            }
        }
        Ok(result)
    }

    fn negation(
        &mut self,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        trail: &Trail<'_>,
    ) -> EvaluationResult<bool> {
        let mut result = true;
        for (i, child) in list.elements().iter().enumerate() {
            if self.formula(scope, child, &trail.child(i))? {
                result = false;
                if self.short_circuit() {
                    break;
                }
            }
        }
        Ok(result)
    }

    /// _a1 -> a2 -> ... -> an_ is true unless all premises hold and the conclusion does not
    fn implication(
        &mut self,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        trail: &Trail<'_>,
    ) -> EvaluationResult<bool> {
        let (conclusion, premises) = match list.elements().split_last() {
            Some((conclusion, premises)) if !premises.is_empty() => (conclusion, premises),
            _ => {
                return Err(error(
                    WrongCallingConvention("implication needs at least two formulas".to_owned()),
                    trail,
                ))
            }
        };
        let mut result = false;
        for (i, premise) in premises.iter().enumerate() {
            if !self.formula(scope, premise, &trail.child(i))? {
                result = true;
                if self.short_circuit() {
                    return Ok(true);
                }
            }
        }
        let holds = self.formula(scope, conclusion, &trail.child(premises.len()))?;
        Ok(result || holds)
    }

    fn equivalence(
        &mut self,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        trail: &Trail<'_>,
    ) -> EvaluationResult<bool> {
        let mut first = None;
        let mut result = true;
        for (i, child) in list.elements().iter().enumerate() {
            let value = self.formula(scope, child, &trail.child(i))?;
            match first {
                None => first = Some(value),
                Some(f) if f != value => {
                    result = false;
                    if self.short_circuit() {
                        break;
                    }
                }
                Some(_) => {}
            }
        }
        Ok(result)
    }

    fn predicate_variable(
        &mut self,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        trail: &Trail<'_>,
    ) -> EvaluationResult<bool> {
        let name = atom(list, 0, trail)?;
        let arguments = self.terms(scope, list, trail)?;
        let arity = arguments.len();
        let model = self.model;
        if model.predicate_pool_size(arity) == 0 {
            return Err(error(
                MissingInterpretation {
                    kind: "predicate",
                    arity,
                },
                trail,
            ));
        }
        let selection = self.predicates.get(PredicateVariable::new(name, arity));
        decide(model.predicate(arity, selection), &arguments, trail)
    }

    fn predicate_constant(
        &mut self,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        trail: &Trail<'_>,
    ) -> EvaluationResult<bool> {
        let name = atom(list, 0, trail)?;
        let arguments = self.terms(scope, list, trail)?;
        let resolution = resolve_predicate(self.model, self.resolver, scope, name, arguments.len())
            .map_err(|kind| error(kind, trail))?;
        match resolution {
            Resolution::Primitive(predicate) => decide(predicate, &arguments, trail),
            Resolution::Defined { definition, owner } => {
                self.defined_predicate(owner, definition, &arguments, trail)
            }
        }
    }

    fn defined_predicate(
        &mut self,
        owner: &'a ModuleDefinitions,
        definition: &'a PredicateDefinition,
        arguments: &[Entity],
        trail: &Trail<'_>,
    ) -> EvaluationResult<bool> {
        debug!(
            module = owner.label(),
            predicate = definition.name(),
            "evaluating predicate definition"
        );
        self.bind_parameters(definition.parameters(), arguments);
        let result = self.formula(owner, definition.body(), &trail.definition(definition.name()));
        self.unbind_parameters(definition.parameters());
        result
    }

    fn bind_parameters(&mut self, parameters: &'a [String], arguments: &[Entity]) {
        for (parameter, argument) in parameters.iter().zip(arguments) {
            self.subjects
                .force_add(SubjectVariable::new(parameter), argument.value());
        }
    }

    fn unbind_parameters(&mut self, parameters: &'a [String]) {
        for parameter in parameters.iter().rev() {
            self.subjects.force_remove(&SubjectVariable::new(parameter));
        }
    }

    fn quantifier(
        &mut self,
        operator: Operator,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        trail: &Trail<'_>,
    ) -> EvaluationResult<bool> {
        if list.len() != 2 && list.len() != 3 {
            return Err(error(
                WrongCallingConvention(format!(
                    "{} needs a variable and one or two formulas",
                    list.operator()
                )),
                trail,
            ));
        }
        let variable = bound_variable(list, trail)?;
        self.subjects.add(variable);
        let result = self.quantify(operator, scope, list, variable, trail);
        self.subjects.remove(&variable);
        result
    }

    fn quantify(
        &mut self,
        operator: Operator,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        variable: SubjectVariable<'a>,
        trail: &Trail<'_>,
    ) -> EvaluationResult<bool> {
        let mut witnesses = 0;
        for i in 0..self.model.entity_count() {
            if i > 0 {
                self.subjects.increase_selection(&variable);
            }
            let holds = self.quantified_body(operator, scope, list, trail)?;
            match operator {
                Operator::Universal if !holds => return Ok(false),
                Operator::Existential if holds => return Ok(true),
                Operator::UniqueExistential if holds => {
                    witnesses += 1;
                    if witnesses > 1 {
                        return Ok(false);
                    }
                }
                _ => {}
            }
        }
        Ok(match operator {
            Operator::Universal => true,
            Operator::Existential => false,
            _ => witnesses == 1,
        })
    }

    /// The body of a quantifier for the current selection of its variable. In the restricted form
    /// this is _restriction -> body_ for universal and _restriction & body_ for existential
    /// quantifiers.
    fn quantified_body(
        &mut self,
        operator: Operator,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        trail: &Trail<'_>,
    ) -> EvaluationResult<bool> {
        let elements = list.elements();
        if elements.len() == 2 {
            return self.formula(scope, &elements[1], &trail.child(1));
        }
        let universal = operator == Operator::Universal;
        let restriction = self.formula(scope, &elements[1], &trail.child(1))?;
        if !restriction && self.short_circuit() {
            return Ok(universal);
        }
        let body = self.formula(scope, &elements[2], &trail.child(2))?;
        Ok(if universal {
            !restriction || body
        } else {
            restriction && body
        })
    }

    fn terms(
        &mut self,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        trail: &Trail<'_>,
    ) -> EvaluationResult<Vec<Entity>> {
        list.elements()
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, e)| self.term(scope, e, &trail.child(i)))
            .collect()
    }

    fn term(
        &mut self,
        scope: &'a ModuleDefinitions,
        element: &'a Element,
        trail: &Trail<'_>,
    ) -> EvaluationResult<Entity> {
        self.check_depth(trail)?;
        let list = list(element, trail)?;
        match Operator::from_tag(list.operator()) {
            Some(Operator::SubjectVariable) => {
                if list.len() != 1 {
                    return Err(error(
                        WrongCallingConvention("VAR needs exactly one name".to_owned()),
                        trail,
                    ));
                }
                let name = atom(list, 0, trail)?;
                let selection = self.subjects.get(SubjectVariable::new(name));
                Ok(self.model.entity(selection).clone())
            }
            Some(Operator::FunctionVariable) => self.function_variable(scope, list, trail),
            Some(Operator::FunctionConstant) => self.function_constant(scope, list, trail),
            Some(Operator::Class) => self.class(scope, list, trail),
            _ => Err(error(UnknownTermOperator(list.operator().to_owned()), trail)),
        }
    }

    fn function_variable(
        &mut self,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        trail: &Trail<'_>,
    ) -> EvaluationResult<Entity> {
        let name = atom(list, 0, trail)?;
        let arguments = self.terms(scope, list, trail)?;
        let arity = arguments.len();
        let model = self.model;
        if model.function_pool_size(arity) == 0 {
            return Err(error(
                MissingInterpretation {
                    kind: "function",
                    arity,
                },
                trail,
            ));
        }
        let selection = self.functions.get(FunctionVariable::new(name, arity));
        apply(model, model.function(arity, selection), &arguments, trail)
    }

    fn function_constant(
        &mut self,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        trail: &Trail<'_>,
    ) -> EvaluationResult<Entity> {
        let name = atom(list, 0, trail)?;
        let arguments = self.terms(scope, list, trail)?;
        let resolution = resolve_function(self.model, self.resolver, scope, name, arguments.len())
            .map_err(|kind| error(kind, trail))?;
        match resolution {
            Resolution::Primitive(function) => apply(self.model, function, &arguments, trail),
            Resolution::Defined { definition, owner } => {
                self.defined_function(owner, definition, &arguments, trail)
            }
        }
    }

    fn defined_function(
        &mut self,
        owner: &'a ModuleDefinitions,
        definition: &'a FunctionDefinition,
        arguments: &[Entity],
        trail: &Trail<'_>,
    ) -> EvaluationResult<Entity> {
        debug!(
            module = owner.label(),
            function = definition.name(),
            "evaluating function definition"
        );
        self.bind_parameters(definition.parameters(), arguments);
        let result = self.term(owner, definition.body(), &trail.definition(definition.name()));
        self.unbind_parameters(definition.parameters());
        result
    }

    /// The entity representing _{ x | formula }_
    fn class(
        &mut self,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        trail: &Trail<'_>,
    ) -> EvaluationResult<Entity> {
        if list.len() != 2 {
            return Err(error(
                WrongCallingConvention("CLASS needs a variable and a formula".to_owned()),
                trail,
            ));
        }
        let variable = bound_variable(list, trail)?;
        self.subjects.add(variable);
        let members = self.members(scope, list, variable, trail);
        self.subjects.remove(&variable);
        Ok(self.model.comprehension(&members?).clone())
    }

    fn members(
        &mut self,
        scope: &'a ModuleDefinitions,
        list: &'a ElementList,
        variable: SubjectVariable<'a>,
        trail: &Trail<'_>,
    ) -> EvaluationResult<Vec<Entity>> {
        let model = self.model;
        let formula = &list.elements()[1];
        let mut members = Vec::new();
        for entity in model.entities() {
            if entity.value() > 0 {
                self.subjects.increase_selection(&variable);
            }
            if self.formula(scope, formula, &trail.child(1))?
                && self.is_set(scope, entity, trail)?
            {
                members.push(entity.clone());
            }
        }
        Ok(members)
    }

    fn is_set(
        &mut self,
        scope: &'a ModuleDefinitions,
        entity: &Entity,
        trail: &Trail<'_>,
    ) -> EvaluationResult<bool> {
        if !self.options.class_requires_set {
            return Ok(true);
        }
        let arguments = std::slice::from_ref(entity);
        match resolve_predicate(self.model, self.resolver, scope, "isSet", 1)
            .map_err(|kind| error(kind, trail))?
        {
            Resolution::Primitive(predicate) => decide(predicate, arguments, trail),
            Resolution::Defined { definition, owner } => {
                self.defined_predicate(owner, definition, arguments, trail)
            }
        }
    }
}

fn error(kind: EvaluationErrorKind, trail: &Trail<'_>) -> EvaluationError {
    EvaluationError::new(kind, trail.to_string())
}

fn list<'e>(element: &'e Element, trail: &Trail<'_>) -> EvaluationResult<&'e ElementList> {
    element.as_list().ok_or_else(|| {
        error(
            WrongCallingConvention(format!("expected a list, found {}", element)),
            trail,
        )
    })
}

fn atom<'e>(list: &'e ElementList, index: usize, trail: &Trail<'_>) -> EvaluationResult<&'e str> {
    match list.element(index) {
        Some(element) => element.as_atom().ok_or_else(|| {
            error(
                WrongCallingConvention(format!("expected a name, found {}", element)),
                &trail.child(index),
            )
        }),
        None => Err(error(
            WrongCallingConvention(format!("{} needs a name", list.operator())),
            trail,
        )),
    }
}

/// The variable bound by a quantifier or class, given as first element `VAR(name)`
fn bound_variable<'e>(
    list: &'e ElementList,
    trail: &Trail<'_>,
) -> EvaluationResult<SubjectVariable<'e>> {
    let trail = trail.child(0);
    let variable = match list.element(0).and_then(Element::as_list) {
        Some(v) if v.operator() == Operator::SubjectVariable.tag() && v.len() == 1 => v,
        _ => {
            return Err(error(
                WrongCallingConvention(format!("{} must bind a subject variable", list.operator())),
                &trail,
            ))
        }
    };
    Ok(SubjectVariable::new(atom(variable, 0, &trail)?))
}

fn check_parameters(
    name: &str,
    arity: usize,
    arguments: &[Entity],
    trail: &Trail<'_>,
) -> EvaluationResult<()> {
    if arguments.len() == arity {
        Ok(())
    } else {
        Err(error(
            ArityMismatch {
                name: name.to_owned(),
                expected: Arity::exactly(arity),
                actual: arguments.len(),
            },
            trail,
        ))
    }
}

fn decide(
    predicate: &SharedPredicate,
    arguments: &[Entity],
    trail: &Trail<'_>,
) -> EvaluationResult<bool> {
    if predicate.arity().accepts(arguments.len()) {
        Ok(predicate.decide(arguments))
    } else {
        Err(error(
            ArityMismatch {
                name: predicate.name().to_owned(),
                expected: predicate.arity(),
                actual: arguments.len(),
            },
            trail,
        ))
    }
}

fn apply(
    model: &Model,
    function: &SharedFunction,
    arguments: &[Entity],
    trail: &Trail<'_>,
) -> EvaluationResult<Entity> {
    if function.arity().accepts(arguments.len()) {
        Ok(function.map(model.entities(), arguments).clone())
    } else {
        Err(error(
            ArityMismatch {
                name: function.name().to_owned(),
                expected: function.arity(),
                actual: arguments.len(),
            },
            trail,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelKind;

    fn truth() -> Element {
        Element::predcon("TRUE", vec![])
    }

    fn falsity() -> Element {
        Element::predcon("FALSE", vec![])
    }

    fn member(x: &str, y: &str) -> Element {
        Element::predcon("in", vec![Element::var(x), Element::var(y)])
    }

    fn evaluate(
        kind: ModelKind,
        options: EvaluationOptions,
        formula: &Element,
    ) -> EvaluationResult<bool> {
        let model = kind.build();
        let module = ModuleDefinitions::new("test");
        Interpreter::new(&model, &NoImports, options).evaluate_formula(&module, formula)
    }

    fn value(kind: ModelKind, formula: &Element) -> bool {
        evaluate(kind, EvaluationOptions::default(), formula).unwrap()
    }

    #[test]
    fn connectives() {
        let one = ModelKind::One;
        assert!(value(one, &Element::and(vec![])));
        assert!(!value(one, &Element::or(vec![])));
        assert!(!value(one, &Element::and(vec![truth(), falsity(), truth()])));
        assert!(value(one, &Element::or(vec![falsity(), truth()])));
        assert!(value(one, &Element::not(falsity())));
        assert!(value(one, &Element::list(Operator::Negation, vec![falsity(), falsity()])));
        assert!(!value(one, &Element::list(Operator::Negation, vec![falsity(), truth()])));
        assert!(value(one, &Element::equivalent(falsity(), falsity())));
        assert!(!value(
            one,
            &Element::list(Operator::Equivalence, vec![truth(), truth(), falsity()])
        ));
    }

    #[test]
    fn chained_implication() {
        let one = ModelKind::One;
        let chain = |a: Element, b: Element, c: Element| {
            Element::list(Operator::Implication, vec![a, b, c])
        };
        assert!(!value(one, &chain(truth(), truth(), falsity())));
        assert!(value(one, &chain(truth(), falsity(), falsity())));
        assert!(value(one, &chain(truth(), truth(), truth())));

        let single = Element::list(Operator::Implication, vec![truth()]);
        let e = evaluate(one, EvaluationOptions::default(), &single).unwrap_err();
        assert_eq!(e.code(), 37400);
    }

    #[test]
    fn short_circuit_skips_failing_children() {
        let missing = Element::predcon("missing", vec![]);
        let formula = Element::and(vec![falsity(), missing.clone()]);
        assert_eq!(evaluate(ModelKind::One, EvaluationOptions::default(), &formula), Ok(false));

        let exhaustive = EvaluationOptions {
            connectives: Connectives::Exhaustive,
            ..EvaluationOptions::default()
        };
        let e = evaluate(ModelKind::One, exhaustive, &formula).unwrap_err();
        assert_eq!(e.code(), 37430);
        assert_eq!(e.location(), "test/1");

        // the first counterexample ends a universal quantifier in both modes
        let quantified = Element::forall("x", Element::and(vec![falsity(), missing]));
        let e = evaluate(ModelKind::Three, exhaustive, &quantified).unwrap_err();
        assert_eq!(e.code(), 37430);
        let short = evaluate(ModelKind::Three, EvaluationOptions::default(), &quantified);
        assert_eq!(short, Ok(false));
    }

    #[test]
    fn quantifiers() {
        let three = ModelKind::Three;
        let asymmetric = Element::forall(
            "x",
            Element::forall(
                "y",
                Element::implies(member("x", "y"), Element::not(member("y", "x"))),
            ),
        );
        assert!(value(three, &asymmetric));
        assert!(!value(three, &Element::forall("x", Element::exists("y", member("y", "x")))));
        let minimal = Element::exists("x", Element::forall("y", Element::not(member("y", "x"))));
        assert!(value(three, &minimal));

        let empty = Element::funcon("emptySet", vec![]);
        let is_empty = Element::predcon("equal", vec![Element::var("x"), empty]);
        assert!(value(three, &Element::exists_unique("x", is_empty)));
        assert!(!value(three, &Element::exists_unique("x", truth())));
        assert!(!value(three, &Element::exists_unique("x", falsity())));
    }

    #[test]
    fn restricted_quantifiers() {
        let three = ModelKind::Three;
        // every element of 2 is an element of 2
        let formula = Element::restricted(
            Operator::Universal,
            "y",
            member("y", "x"),
            Element::exists("z", member("y", "z")),
        );
        assert!(value(three, &Element::forall("x", formula)));
        let none = Element::restricted(Operator::Existential, "y", falsity(), truth());
        assert!(!value(three, &none));
    }

    #[test]
    fn free_variables_are_enumerated() {
        let model = ModelKind::Three.build();
        let module = ModuleDefinitions::new("test");
        let formula = member("x", "y");
        let mut interpreter = Interpreter::new(&model, &NoImports, EvaluationOptions::default());
        let mut values = vec![interpreter.evaluate_formula(&module, &formula).unwrap()];
        while interpreter.next() {
            values.push(interpreter.evaluate_formula(&module, &formula).unwrap());
        }
        assert_eq!(values.len(), 9);
        assert_eq!(values.iter().filter(|v| **v).count(), 3);
        assert_eq!(interpreter.subjects().len(), 2);
    }

    #[test]
    fn predicate_variables() {
        let model = ModelKind::Three.build();
        let module = ModuleDefinitions::new("test");
        let formula = Element::predvar("P", vec![Element::var("x")]);
        let mut interpreter = Interpreter::new(&model, &NoImports, EvaluationOptions::default());
        interpreter.evaluate_formula(&module, &formula).unwrap();
        let mut passes = 1;
        while interpreter.next() {
            interpreter.evaluate_formula(&module, &formula).unwrap();
            passes += 1;
        }
        assert_eq!(passes, 3 * model.predicate_pool_size(1));
    }

    #[test]
    fn missing_interpretation() {
        let formula = Element::predvar("P", vec![Element::var("x"); 5]);
        let e = evaluate(ModelKind::Three, EvaluationOptions::default(), &formula).unwrap_err();
        assert_eq!(e.code(), 37460);
    }

    #[test]
    fn classes() {
        let model = ModelKind::Four.build();
        let module = ModuleDefinitions::new("test");
        let mut interpreter = Interpreter::new(&model, &NoImports, EvaluationOptions::default());
        let all = Element::class("x", truth());
        assert_eq!(interpreter.evaluate_term(&module, &all).unwrap().label(), "V");
        let none = Element::class("x", falsity());
        assert_eq!(interpreter.evaluate_term(&module, &none).unwrap().value(), 0);
        let empty = Element::funcon("emptySet", vec![]);
        let singleton = Element::class(
            "x",
            Element::predcon("equal", vec![Element::var("x"), empty]),
        );
        assert_eq!(interpreter.evaluate_term(&module, &singleton).unwrap().value(), 1);
        assert!(interpreter.subjects().is_empty());
    }

    #[test]
    fn definitions() {
        let model = ModelKind::Three.build();
        let mut module = ModuleDefinitions::new("set");
        let subset = PredicateDefinition::new(
            "sub",
            vec!["x".to_owned(), "y".to_owned()],
            Element::forall("z", Element::implies(member("z", "x"), member("z", "y"))),
        )
        .unwrap();
        module.add_predicate(subset).unwrap();
        let reflexive = Element::forall(
            "x",
            Element::predcon("sub", vec![Element::var("x"), Element::var("x")]),
        );
        let mut interpreter = Interpreter::new(&model, &NoImports, EvaluationOptions::default());
        assert_eq!(interpreter.evaluate_formula(&module, &reflexive), Ok(true));
        assert!(interpreter.subjects().is_empty());

        let definition = module.predicate("sub", 2).unwrap();
        let (a, b) = (model.entity(1).clone(), model.entity(0).clone());
        assert_eq!(
            interpreter.calculate_predicate_value(&module, definition, &[a.clone(), b.clone()]),
            Ok(false)
        );
        assert_eq!(
            interpreter.calculate_predicate_value(&module, definition, &[b, a.clone()]),
            Ok(true)
        );
        let e = interpreter
            .calculate_predicate_value(&module, definition, &[a])
            .unwrap_err();
        assert_eq!(e.code(), 37470);
    }

    #[test]
    fn error_locations() {
        let broken = Element::list(Operator::Conjunction, vec![
            truth(),
            Element::not(Element::List(ElementList::new("FOO", vec![]))),
        ]);
        let e = evaluate(ModelKind::One, EvaluationOptions::default(), &broken).unwrap_err();
        assert_eq!(e.code(), 37410);
        assert_eq!(e.location(), "test/1/0");

        let options = EvaluationOptions::default();
        let e = evaluate(ModelKind::One, options, &Element::atom("x")).unwrap_err();
        assert_eq!(e.code(), 37400);

        let term_as_formula = Element::var("x");
        let e = evaluate(ModelKind::One, options, &term_as_formula).unwrap_err();
        assert_eq!(e.code(), 37410);

        let formula_as_term = Element::predcon("equal", vec![truth(), truth()]);
        let e = evaluate(ModelKind::One, options, &formula_as_term).unwrap_err();
        assert_eq!(e.code(), 37420);

        let listed_name = Element::list(Operator::SubjectVariable, vec![truth()]);
        let compared = Element::predcon("equal", vec![listed_name, Element::var("y")]);
        let e = evaluate(ModelKind::One, options, &compared).unwrap_err();
        assert_eq!(e.code(), 37400);
        assert!(e.message().contains("expected a name"), "{}", e.message());
        assert!(e.location().ends_with("/0"), "{}", e.location());
    }

    #[test]
    fn depth_limit() {
        let nested = Element::not(Element::not(Element::not(truth())));
        let shallow = EvaluationOptions {
            max_depth: 2,
            ..EvaluationOptions::default()
        };
        let e = evaluate(ModelKind::One, shallow, &nested).unwrap_err();
        assert_eq!(e.code(), 37480);
        assert_eq!(evaluate(ModelKind::One, EvaluationOptions::default(), &nested), Ok(false));
    }

    #[test]
    fn countermodel_restore() {
        let model = ModelKind::Three.build();
        let module = ModuleDefinitions::new("test");
        let formula = member("x", "y");
        let mut interpreter = Interpreter::new(&model, &NoImports, EvaluationOptions::default());
        interpreter.evaluate_formula(&module, &formula).unwrap();
        interpreter.next();
        interpreter.next();
        let recorded = interpreter.countermodel();
        assert_eq!(recorded.subject("y"), Some(model.entity(2).label()));

        let mut other = Interpreter::new(&model, &NoImports, EvaluationOptions::default());
        other.restore(&recorded).unwrap();
        assert_eq!(other.countermodel(), recorded);

        let one = ModelKind::One.build();
        let mut wrong = Interpreter::new(&one, &NoImports, EvaluationOptions::default());
        assert_eq!(wrong.restore(&recorded).unwrap_err().code(), 37499);
    }
}

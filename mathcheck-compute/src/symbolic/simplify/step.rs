use std::fmt;

/// A rewrite applied by the simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `a + 0 = a`
    AddZero,

    /// `2 + 3 = 5`
    AddNumbers,

    /// `a + a = 2a`
    CombineLikeTerms,

    /// `oo + 1 = oo`
    AbsorbIntoInfinity,

    /// `0*a = 0`
    MultiplyZero,

    /// `1*a = a`
    MultiplyOne,

    /// `2*3 = 6`
    MultiplyNumbers,

    /// `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `a*(b+c) = a*b + a*c`
    DistributiveProperty,

    /// `(a+b)^2 = a^2 + 2ab + b^2`
    ExpandPower,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    OnePower,

    /// `0^a = 0`, `a > 0`
    ZeroPower,

    /// `(a^b)^c = a^(bc)`
    PowerOfPower,

    /// `(ab)^c = a^c b^c`
    PowerOfProduct,

    /// `2^3 = 8`
    NumericPower,

    /// `sqrt(12) = 2*sqrt(3)`
    Root,

    /// `log(100, 10) = 2`
    Logarithm,

    /// `exp(log(x)) = x`
    ExpOfLog,

    /// `sin(pi/6) = 1/2`
    Trigonometry,

    /// `sin(x)^2 + cos(x)^2 = 1`
    PythagoreanIdentity,

    /// `abs(-3) = 3`
    AbsoluteValue,

    /// `5! = 120`
    Factorial,

    /// `2*oo = oo`
    Infinity,

    /// `2.0*pi = 6.28318530717959`
    EvaluateFloat,
}

impl Step {
    /// A short description of the step, in Spanish.
    pub fn description(self) -> &'static str {
        match self {
            Step::AddZero => "sumar cero no cambia la expresión",
            Step::AddNumbers => "sumar los números",
            Step::CombineLikeTerms => "agrupar términos semejantes",
            Step::AbsorbIntoInfinity => "un número sumado a infinito es infinito",
            Step::MultiplyZero => "multiplicar por cero da cero",
            Step::MultiplyOne => "multiplicar por uno no cambia la expresión",
            Step::MultiplyNumbers => "multiplicar los números",
            Step::CombineLikeFactors => "agrupar factores con la misma base",
            Step::DistributiveProperty => "aplicar la propiedad distributiva",
            Step::ExpandPower => "desarrollar la potencia de una suma",
            Step::PowerZero => "todo número elevado a cero es uno",
            Step::PowerOne => "elevar a uno no cambia la expresión",
            Step::OnePower => "uno elevado a cualquier potencia es uno",
            Step::ZeroPower => "cero elevado a una potencia positiva es cero",
            Step::PowerOfPower => "potencia de una potencia",
            Step::PowerOfProduct => "potencia de un producto",
            Step::NumericPower => "calcular la potencia",
            Step::Root => "extraer factores de la raíz",
            Step::Logarithm => "calcular el logaritmo",
            Step::ExpOfLog => "la exponencial y el logaritmo se cancelan",
            Step::Trigonometry => "usar un valor trigonométrico conocido",
            Step::PythagoreanIdentity => "aplicar sen²(x) + cos²(x) = 1",
            Step::AbsoluteValue => "calcular el valor absoluto",
            Step::Factorial => "calcular el factorial",
            Step::Infinity => "operar con infinito",
            Step::EvaluateFloat => "evaluar con decimales",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

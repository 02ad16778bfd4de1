use crate::model::Stay;

/// Chevauchement d'intervalles semi-ouverts : chacun commence avant la fin de l'autre.
/// Deux séjours bout à bout (départ == arrivée) ne se chevauchent pas.
pub fn overlaps(a: Stay, b: Stay) -> bool {
    a.check_in < b.check_out && b.check_in < a.check_out
}

/// Vrai si la fenêtre d'extension `[départ actuel, départ proposé)` empiète sur `other`.
///
/// Seules les nuits ajoutées sont testées : le séjour d'origine a déjà été validé
/// à la création.
pub fn window_intrudes(window: Stay, other: Stay) -> bool {
    overlaps(window, other)
}

use smallvec::{SmallVec, smallvec};
use small_ast::{ProgramPoint, Statement};

use crate::edge::{CfgEdge, EdgeCase, Exit};
use crate::graph::Cfg;

/// The open exits of a subgraph, linked to whatever statement comes next.
pub type Frontier = SmallVec<[Exit; 2]>;

/// Build the graph of a statement sequence.
///
/// Every exit in `frontier` is connected to the first statement; each
/// statement's exits are then connected to its successor. The exits of the
/// last statement are returned. An empty sequence passes `frontier` through
/// unchanged, which is how an empty `else {}` links its condition straight to
/// the code after the `if`.
pub fn sequence_cfg(statements: &[Statement], mut frontier: Frontier) -> (Frontier, Cfg) {
    let mut cfg = Cfg::new();
    for statement in statements {
        let point = ProgramPoint::from(statement);
        cfg.add_node(point.clone());
        for exit in frontier.drain(..) {
            cfg.add_edge(&exit.point, &point, exit.edge());
        }
        let (exits, subgraph) = statement_cfg(statement);
        cfg.merge(&subgraph);
        frontier = exits;
    }
    (frontier, cfg)
}

/// Build the graph of a single statement, returning its open exits.
pub fn statement_cfg(statement: &Statement) -> (Frontier, Cfg) {
    let point = ProgramPoint::from(statement);
    let mut cfg = Cfg::new();
    cfg.add_node(point.clone());

    let frontier = match statement {
        Statement::Assignment { .. } => smallvec![Exit::fallthrough(point)],
        Statement::Return { .. } => Frontier::new(),
        Statement::IfElse {
            condition,
            if_body,
            else_body,
            ..
        } => {
            let (mut exits, if_cfg) = sequence_cfg(
                if_body,
                smallvec![Exit::new(point.clone(), condition.clone(), EdgeCase::True)],
            );
            let (else_exits, else_cfg) = sequence_cfg(
                else_body,
                smallvec![Exit::new(point, condition.negate(), EdgeCase::False)],
            );
            cfg.merge(&if_cfg);
            cfg.merge(&else_cfg);
            exits.extend(else_exits);
            exits
        }
        Statement::While {
            condition, body, ..
        } => {
            let (body_exits, body_cfg) = sequence_cfg(
                body,
                smallvec![Exit::new(point.clone(), condition.clone(), EdgeCase::True)],
            );
            cfg.merge(&body_cfg);
            for exit in body_exits {
                cfg.add_edge(&exit.point, &point, CfgEdge::new(exit.condition, exit.case));
            }
            smallvec![Exit::new(point, condition.negate(), EdgeCase::False)]
        }
    };
    (frontier, cfg)
}

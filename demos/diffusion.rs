//! Assemble the linear system of a steady diffusion problem on two
//! triangles and print its rows.
//!
//! Run with `RUST_LOG=debug cargo run --example diffusion` to see the
//! builder's progress output.

use fvm2d::{
    BoundaryConditionKind, BoundaryConditionRegistry, BuildError, ComputationalCell,
    ComputationalFace, ComputationalGridAccessor, ComputationalMeshBuilder, MeshBuilder, MeshId,
};

const QUANTITY: &str = "Temperature";

fn diffusion_flux(
    accessor: &ComputationalGridAccessor<'_>,
    cell: &ComputationalCell,
    face: &mut ComputationalFace,
) -> bool {
    if face.flux_molecule(QUANTITY).unwrap().cell().is_some() {
        return true;
    }
    let own = cell.variable(QUANTITY).unwrap().clone();

    match face.boundary_condition().copied() {
        Some(bc) if bc.kind().is_dirichlet() => {
            let w = face.area() / fvm2d::geometry::distance(cell.centroid(), face.centroid());
            let molecule = face.flux_molecule_mut(QUANTITY).unwrap();
            molecule.add(&own, -w);
            *molecule.source_term_mut() += w * bc.value();
            molecule.set_cell(cell.geometric());
        }
        Some(bc) => {
            let flux = bc.value() * face.area();
            let molecule = face.flux_molecule_mut(QUANTITY).unwrap();
            *molecule.source_term_mut() += flux;
            molecule.set_cell(cell.geometric());
        }
        None => {
            let other = accessor.other_cell(face, cell).unwrap();
            let theirs = other.variable(QUANTITY).unwrap().clone();
            let w = face.area() / fvm2d::geometry::distance(cell.centroid(), other.centroid());
            let molecule = face.flux_molecule_mut(QUANTITY).unwrap();
            molecule.add(&own, -w);
            molecule.add(&theirs, w);
            molecule.set_cell(cell.geometric());
        }
    }
    true
}

fn main() -> Result<(), BuildError> {
    env_logger::init();

    // Unit square split along the diagonal into two triangles, with a hot
    // left wall and a cold right wall.
    let mut geometry = MeshBuilder::new();
    let nodes = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    for (i, &(x, y)) in nodes.iter().enumerate() {
        geometry
            .add_node(MeshId::new(i as u64), true, x, y)
            .expect("fresh node id");
    }
    let edges: [(u64, u64, bool); 5] =
        [(0, 1, true), (1, 2, true), (2, 3, true), (3, 0, true), (0, 2, false)];
    for (i, &(a, b, on_boundary)) in edges.iter().enumerate() {
        geometry
            .add_face(
                MeshId::new(i as u64),
                on_boundary,
                [MeshId::new(a), MeshId::new(b)],
            )
            .expect("fresh face id");
    }
    geometry
        .add_cell(MeshId::new(0), &[MeshId::new(0), MeshId::new(1), MeshId::new(4)])
        .expect("valid cell");
    geometry
        .add_cell(MeshId::new(1), &[MeshId::new(4), MeshId::new(2), MeshId::new(3)])
        .expect("valid cell");

    let mut bcs = BoundaryConditionRegistry::new();
    bcs.add(MeshId::new(3), BoundaryConditionKind::Dirichlet, 1.0);
    bcs.add(MeshId::new(1), BoundaryConditionKind::Dirichlet, 0.0);
    bcs.add(MeshId::new(0), BoundaryConditionKind::Neumann, 0.0);
    bcs.add(MeshId::new(2), BoundaryConditionKind::Neumann, 0.0);

    let mut builder = ComputationalMeshBuilder::new(geometry.finish(), bcs);
    builder.add_computational_variable(QUANTITY, diffusion_flux);
    builder.set_cell_molecule_evaluator(|_| true);
    let cmesh = builder.build()?;

    // Fold each cell's face fluxes into one equation row. The recording
    // cell keeps the face weights as written; the opposite cell negates
    // them, since the same flux leaves one cell and enters the other.
    for cell in cmesh.cells() {
        let mut row = vec![0.0; cmesh.cells().len()];
        let mut rhs = 0.0;
        for &fi in cell.faces() {
            let molecule = cmesh.face(fi).flux_molecule(QUANTITY).expect("seeded");
            let sign = if molecule.cell() == Some(cell.geometric()) {
                1.0
            } else {
                -1.0
            };
            for (variable, weight) in molecule.molecule().iter() {
                row[variable.cell().get()] += sign * weight;
            }
            rhs -= sign * molecule.source_term().value();
        }
        let coefficients: Vec<String> = row.iter().map(|w| format!("{w:+.4}")).collect();
        println!(
            "row {} | {} | rhs {rhs:+.4}",
            cell.linear_index(),
            coefficients.join(" ")
        );
    }
    Ok(())
}

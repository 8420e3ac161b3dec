use csv::Writer;
use nalgebra::{DMatrix, DVector};
use std::fs::File;
use std::io::{self, Write};

fn headers_with_arg(headers: &[String], arg: &str) -> Vec<String> {
    let mut headers_with_x = Vec::with_capacity(headers.len() + 1);
    headers_with_x.push(arg.to_string());
    headers_with_x.extend(headers.iter().cloned());
    headers_with_x
}

fn check_shape(matrix: &DMatrix<f64>, headers: &[String], x_mesh: &DVector<f64>) -> io::Result<()> {
    if matrix.nrows() != x_mesh.len() || matrix.ncols() != headers.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "matrix {}x{} does not match mesh of {} points and {} headers",
                matrix.nrows(),
                matrix.ncols(),
                x_mesh.len(),
                headers.len()
            ),
        ));
    }
    Ok(())
}

/// Saves a matrix whose rows are grid points into a tab-separated text file,
/// the first column holds the mesh
pub fn save_matrix_to_file(
    matrix: &DMatrix<f64>,
    headers: &[String],
    filename: &str,
    x_mesh: &DVector<f64>,
    arg: &str,
) -> io::Result<()> {
    check_shape(matrix, headers, x_mesh)?;
    let mut file = File::create(filename)?;
    writeln!(file, "{}", headers_with_arg(headers, arg).join("\t"))?;
    for (i, row) in matrix.row_iter().enumerate() {
        let mut row_data = Vec::with_capacity(row.len() + 1);
        row_data.push(x_mesh[i].to_string());
        row_data.extend(row.iter().map(|&val| val.to_string()));
        writeln!(file, "{}", row_data.join("\t"))?;
    }
    Ok(())
}

/// csv version of `save_matrix_to_file`
pub fn save_matrix_to_csv(
    matrix: &DMatrix<f64>,
    headers: &[String],
    filename: &str,
    x_mesh: &DVector<f64>,
    arg: &str,
) -> io::Result<()> {
    check_shape(matrix, headers, x_mesh)?;
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(headers_with_arg(headers, arg))?;
    for (i, row) in matrix.row_iter().enumerate() {
        let mut row_data = Vec::with_capacity(row.len() + 1);
        row_data.push(x_mesh[i].to_string());
        row_data.extend(row.iter().map(|&val| val.to_string()));
        writer.write_record(&row_data)?;
    }
    writer.flush()?;
    Ok(())
}

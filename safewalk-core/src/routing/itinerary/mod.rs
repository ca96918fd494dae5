mod to_geojson;
